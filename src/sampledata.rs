//! Deterministic sample datasets seeded with the defect scenarios the
//! correction rules target: duplicate ids, broken contact fields, invalid
//! vocabulary values, arithmetic mismatches, orphan references and
//! inconsistent dates, padded with clean filler rows.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{ActiveFlag, Customer, Datasets, Product, Sale, Shipment};
use crate::vocab::{SALE_STATUSES, VALID_STATES};

const SEED: u64 = 42;

const FIRST_NAMES: [&str; 10] = [
    "Beatriz", "Caio", "Daniela", "Felipe", "Gustavo", "Helena", "Igor", "Juliana", "Lucas",
    "Marina",
];

const LAST_NAMES: [&str; 10] = [
    "Almeida", "Barbosa", "Cardoso", "Dias", "Esteves", "Ferreira", "Gomes", "Henrique", "Ramos",
    "Teixeira",
];

const CITIES: [&str; 5] = [
    "São Paulo",
    "Rio de Janeiro",
    "Belo Horizonte",
    "Curitiba",
    "Porto Alegre",
];

const FILLER_PRODUCTS: [(&str, &str); 8] = [
    ("Livro de Receitas", "Livros"),
    ("Bola de Futebol", "Esportes"),
    ("Perfume Floral", "Beleza"),
    ("Pneu Aro 16", "Automotivo"),
    ("Vaso Decorativo", "Jardim"),
    ("Boneca de Pano", "Brinquedos"),
    ("Camisa Polo", "Moda"),
    ("Cadeira de Escritório", "Casa"),
];

const SALE_DATES: [&str; 5] = [
    "2024-02-05",
    "2024-03-18",
    "2024-04-22",
    "2024-05-30",
    "2024-06-11",
];

const SHIPMENT_DATES: [(&str, &str); 4] = [
    ("2024-02-07", "2024-02-12"),
    ("2024-03-20", "2024-03-24"),
    ("2024-04-24", "2024-04-30"),
    ("2024-06-01", "2024-06-05"),
];

const CARRIERS: [&str; 3] = ["Correios", "Jadlog", "Total Express"];

/// Builds the datasets. The defect rows are fixed; the filler rows come
/// from a fixed-seed generator, so repeated calls return identical data.
pub fn generate() -> Datasets {
    let mut rng = StdRng::seed_from_u64(SEED);

    let mut customers = seeded_customers();
    for id in 16..=25 {
        customers.push(filler_customer(id, &mut rng));
    }

    let mut products = seeded_products();
    for (offset, (name, category)) in FILLER_PRODUCTS.iter().enumerate() {
        products.push(filler_product(11 + offset as u32, name, category, &mut rng));
    }

    let mut sales = seeded_sales();
    for id in 12..=25 {
        sales.push(filler_sale(id, &mut rng));
    }

    let mut shipments = seeded_shipments();
    for id in 8..=17 {
        shipments.push(filler_shipment(id, &mut rng));
    }

    Datasets {
        customers,
        products,
        sales,
        shipments,
    }
}

fn seeded_customers() -> Vec<Customer> {
    vec![
        customer(
            1,
            Some("Ana Souza"),
            Some("ana.souza@gmail.com"),
            Some("11987654321"),
            Some("1990-08-15"),
            Some("São Paulo"),
            Some("SP"),
            Some("2023-01-10"),
        ),
        // Same id as the row above; the duplicate must be dropped.
        customer(
            1,
            Some("Ana Souza Duplicada"),
            Some("ana.copia@gmail.com"),
            None,
            None,
            Some("São Paulo"),
            Some("SP"),
            Some("2023-01-11"),
        ),
        customer(
            2,
            None,
            Some("joao.silva@email.com"),
            Some("21998761234"),
            Some("1988-04-02"),
            Some("Rio de Janeiro"),
            Some("RJ"),
            Some("2023-02-01"),
        ),
        customer(
            3,
            Some("Carlos Pereira"),
            Some("carlos@hotmail"),
            None,
            Some("1979-11-23"),
            Some("Belo Horizonte"),
            Some("mg"),
            Some("2023-02-15"),
        ),
        customer(
            4,
            Some("Eduardo Lima"),
            Some("eduardo@teste.co"),
            None,
            None,
            Some("Curitiba"),
            Some("PR"),
            Some("2023-03-08"),
        ),
        customer(
            5,
            Some("Pedro Alves"),
            Some("pedro@invalid"),
            None,
            None,
            Some("Salvador"),
            Some("BA"),
            Some("2023-03-20"),
        ),
        customer(
            6,
            Some("Fernanda Castro"),
            Some("fernanda.castro@gmail.com"),
            Some("(11) 91234-5678"),
            Some("1995-06-30"),
            Some("São Paulo"),
            Some("SP"),
            Some("2023-04-02"),
        ),
        customer(
            7,
            Some("Ricardo Nunes"),
            Some("ricardo.nunes@outlook.com"),
            Some("1133334444"),
            None,
            Some("São Paulo"),
            Some("SP"),
            Some("2023-04-18"),
        ),
        customer(
            8,
            Some("Paula Martins"),
            Some("paula.martins@yahoo.com"),
            Some("119999"),
            None,
            Some("Recife"),
            Some("PE"),
            Some("2023-05-05"),
        ),
        customer(
            9,
            Some("Sérgio Rocha"),
            Some("sergio.rocha@gmail.com"),
            None,
            None,
            Some("São Paulo"),
            Some("SAO PAULO"),
            Some("2023-05-21"),
        ),
        customer(
            10,
            Some("Luciana Costa"),
            Some("luciana.costa@gmail.com"),
            None,
            None,
            Some("Rio de Janeiro"),
            Some("rj"),
            Some("2023-06-01"),
        ),
        customer(
            11,
            Some("Marcos Vieira"),
            Some("marcos.vieira@gmail.com"),
            None,
            Some("15/08/1992"),
            Some("Fortaleza"),
            Some("CE"),
            Some("2023/03/05"),
        ),
        customer(
            12,
            Some("Tatiane Ramos"),
            Some("tatiane.ramos@gmail.com"),
            None,
            Some("15/13/2023"),
            Some("Manaus"),
            Some("AM"),
            Some("2023-06-15"),
        ),
        customer(
            13,
            Some("  "),
            None,
            None,
            None,
            Some("Goiânia"),
            Some("GO"),
            Some("2023-07-01"),
        ),
        customer(
            14,
            Some("Renata Pires"),
            Some("renata.pires@gmail.com"),
            Some("41988887777"),
            Some("1983-09-12"),
            Some("Curitiba"),
            Some("PR"),
            Some("2023-07-10"),
        ),
        customer(
            15,
            None,
            Some("maria.clara@yahoo"),
            None,
            None,
            Some("Florianópolis"),
            Some("SC"),
            Some("2023-08-02"),
        ),
    ]
}

fn seeded_products() -> Vec<Product> {
    vec![
        product(
            1,
            "Smartphone Galaxy",
            Some("Eletrônicos"),
            1999.90,
            10,
            Some("2023-01-05"),
            ActiveFlag::Bool(true),
        ),
        product(
            2,
            "Mouse Gamer",
            Some("Informática"),
            89.90,
            25,
            Some("2023-01-12"),
            ActiveFlag::Bool(true),
        ),
        // Same id as the row above; the duplicate must be dropped.
        product(
            2,
            "Mouse Gamer Cópia",
            Some("Informática"),
            89.90,
            25,
            Some("2023-01-12"),
            ActiveFlag::Bool(true),
        ),
        product(
            3,
            "Fone de Ouvido",
            Some("Eletrônicos"),
            -29.99,
            40,
            Some("2023-02-01"),
            ActiveFlag::Bool(true),
        ),
        product(
            4,
            "Teclado Mecânico",
            None,
            349.90,
            15,
            Some("2023-02-10"),
            ActiveFlag::Bool(true),
        ),
        product(
            5,
            "Luminária de Teto",
            None,
            120.00,
            8,
            Some("2023-02-18"),
            ActiveFlag::Bool(true),
        ),
        product(
            6,
            "Caixa de Som JBL",
            Some("eletronicos"),
            450.00,
            12,
            Some("2023-03-01"),
            ActiveFlag::Bool(true),
        ),
        product(
            7,
            "Monitor 27\"",
            Some("Informática"),
            1250.00,
            -5,
            Some("2023-03-15"),
            ActiveFlag::Bool(true),
        ),
        product(
            8,
            "Tênis de Corrida",
            Some("Moda"),
            299.90,
            30,
            Some("2023-04-01"),
            ActiveFlag::Text("sim".to_string()),
        ),
        product(
            9,
            "Raquete de Tênis",
            Some("Esportes"),
            189.90,
            10,
            Some("2023-04-12"),
            ActiveFlag::Text("0".to_string()),
        ),
        product(
            10,
            "Kit Jardinagem",
            Some("Jardim"),
            75.50,
            18,
            Some("2023-05-01"),
            ActiveFlag::Text("talvez".to_string()),
        ),
    ]
}

fn seeded_sales() -> Vec<Sale> {
    vec![
        sale(1, 1, 1, 2, 1999.90, 3999.80, Some("2024-01-15"), Some("Concluída")),
        sale(2, 2, 2, 0, 89.90, 0.0, Some("2024-01-20"), Some("Concluída")),
        sale(3, 3, 3, -3, 50.00, -150.00, Some("2024-02-01"), Some("Concluída")),
        sale(4, 4, 4, 2, 100.00, 150.00, Some("2024-02-10"), Some("Concluída")),
        // References a customer that does not exist.
        sale(5, 999, 5, 1, 120.00, 120.00, Some("2024-02-15"), Some("Pendente")),
        // References a product that does not exist.
        sale(6, 5, 888, 1, 75.00, 75.00, Some("2024-02-20"), Some("Pendente")),
        // Both references dangle.
        sale(7, 999, 888, 1, 60.00, 60.00, Some("2024-03-01"), Some("Pendente")),
        sale(8, 5, 5, 1, 59.90, 59.90, Some("2030-05-20"), Some("Concluída")),
        sale(9, 6, 6, 1, 120.00, 120.00, Some("2024-04-02"), Some("concluida")),
        sale(10, 7, 7, 2, 45.50, 91.00, Some("2024-04-10"), Some("pendente")),
        sale(11, 8, 8, 1, 199.90, 199.90, Some("2024-04-18"), Some("cancelado")),
    ]
}

fn seeded_shipments() -> Vec<Shipment> {
    vec![
        shipment(
            1,
            1,
            Some("Correios"),
            Some("2024-01-16"),
            Some("2024-01-20"),
            Some("Entregue"),
        ),
        shipment(
            2,
            2,
            None,
            Some("2024-02-10"),
            Some("2024-02-12"),
            Some("Entregue"),
        ),
        // References a sale that does not exist.
        shipment(
            3,
            777,
            Some("Jadlog"),
            Some("2024-02-15"),
            Some("2024-02-18"),
            Some("Entregue"),
        ),
        shipment(
            4,
            3,
            Some("Correios"),
            Some("2024-03-10"),
            Some("2024-03-05"),
            Some("Entregue"),
        ),
        shipment(
            5,
            4,
            Some("Total Express"),
            Some("2024-03-12"),
            Some("2024-03-16"),
            Some("em transito"),
        ),
        shipment(6, 9, Some("Correios"), None, None, Some("Aguardando")),
        shipment(
            7,
            10,
            Some("Jadlog"),
            Some("2024-04-20"),
            Some("2024-04-25"),
            Some("entregue"),
        ),
    ]
}

fn filler_customer(id: u32, rng: &mut StdRng) -> Customer {
    let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
    let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];

    customer(
        id,
        Some(&format!("{} {}", first, last)),
        Some(&format!(
            "{}.{}@gmail.com",
            first.to_lowercase(),
            last.to_lowercase()
        )),
        Some(&format!("119{:08}", rng.gen_range(0..100_000_000u32))),
        Some(&format!(
            "19{:02}-{:02}-{:02}",
            rng.gen_range(70..100u32),
            rng.gen_range(1..13u32),
            rng.gen_range(1..29u32)
        )),
        Some(CITIES[rng.gen_range(0..CITIES.len())]),
        Some(VALID_STATES[rng.gen_range(0..VALID_STATES.len())]),
        Some(&format!(
            "20{:02}-{:02}-{:02}",
            rng.gen_range(21..25u32),
            rng.gen_range(1..13u32),
            rng.gen_range(1..29u32)
        )),
    )
}

fn filler_product(id: u32, name: &str, category: &str, rng: &mut StdRng) -> Product {
    product(
        id,
        name,
        Some(category),
        rng.gen_range(1500..80_000u32) as f64 / 100.0,
        rng.gen_range(0..50),
        Some(&format!(
            "2023-{:02}-{:02}",
            rng.gen_range(1..13u32),
            rng.gen_range(1..29u32)
        )),
        ActiveFlag::Bool(true),
    )
}

fn filler_sale(id: u32, rng: &mut StdRng) -> Sale {
    let quantity = rng.gen_range(1..5i64);
    let unit_price = rng.gen_range(1000..50_000u32) as f64 / 100.0;

    sale(
        id,
        rng.gen_range(1..26u32),
        rng.gen_range(1..19u32),
        quantity,
        unit_price,
        quantity as f64 * unit_price,
        Some(SALE_DATES[rng.gen_range(0..SALE_DATES.len())]),
        Some(SALE_STATUSES[rng.gen_range(0..SALE_STATUSES.len())]),
    )
}

fn filler_shipment(id: u32, rng: &mut StdRng) -> Shipment {
    let (shipped, delivered) = SHIPMENT_DATES[rng.gen_range(0..SHIPMENT_DATES.len())];

    shipment(
        id,
        rng.gen_range(12..26u32),
        Some(CARRIERS[rng.gen_range(0..CARRIERS.len())]),
        Some(shipped),
        Some(delivered),
        Some("Entregue"),
    )
}

fn customer(
    id: u32,
    name: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    birth_date: Option<&str>,
    city: Option<&str>,
    state: Option<&str>,
    registered_at: Option<&str>,
) -> Customer {
    Customer {
        id,
        name: name.map(str::to_string),
        email: email.map(str::to_string),
        phone: phone.map(str::to_string),
        birth_date: birth_date.map(str::to_string),
        city: city.map(str::to_string),
        state: state.map(str::to_string),
        registered_at: registered_at.map(str::to_string),
    }
}

fn product(
    id: u32,
    name: &str,
    category: Option<&str>,
    price: f64,
    stock: i64,
    created_at: Option<&str>,
    active: ActiveFlag,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        category: category.map(str::to_string),
        price,
        stock,
        created_at: created_at.map(str::to_string),
        active,
    }
}

fn sale(
    id: u32,
    customer_id: u32,
    product_id: u32,
    quantity: i64,
    unit_price: f64,
    total: f64,
    sale_date: Option<&str>,
    status: Option<&str>,
) -> Sale {
    Sale {
        id,
        customer_id,
        product_id,
        quantity,
        unit_price,
        total,
        sale_date: sale_date.map(str::to_string),
        status: status.map(str::to_string),
    }
}

fn shipment(
    id: u32,
    sale_id: u32,
    carrier: Option<&str>,
    ship_date: Option<&str>,
    delivered_at: Option<&str>,
    status: Option<&str>,
) -> Shipment {
    Shipment {
        id,
        sale_id,
        carrier: carrier.map(str::to_string),
        ship_date: ship_date.map(str::to_string),
        delivered_at: delivered_at.map(str::to_string),
        status: status.map(str::to_string),
    }
}
