/// Controlled vocabularies and fixed reference tables used by the correction
/// rules. These are the built-in defaults; every one of them can be overridden
/// through [`crate::config::EngineConfig`].

/// Valid Brazilian state abbreviations (UF codes).
pub const VALID_STATES: [&str; 27] = [
    "AC", "AL", "AP", "AM", "BA", "CE", "DF", "ES", "GO", "MA", "MT", "MS", "MG", "PA", "PB",
    "PR", "PE", "PI", "RJ", "RN", "RS", "RO", "RR", "SC", "SP", "SE", "TO",
];

/// Valid product categories.
pub const VALID_CATEGORIES: [&str; 10] = [
    "Eletrônicos",
    "Informática",
    "Casa",
    "Moda",
    "Esportes",
    "Livros",
    "Beleza",
    "Automotivo",
    "Jardim",
    "Brinquedos",
];

/// Valid sale status values.
pub const SALE_STATUSES: [&str; 4] = ["Concluída", "Pendente", "Cancelada", "Processando"];

/// Valid delivery status values.
pub const DELIVERY_STATUSES: [&str; 4] = ["Entregue", "Em Trânsito", "Cancelada", "Aguardando"];

/// Category assigned to products whose name matches no keyword.
pub const FALLBACK_CATEGORY: &str = "Outros";

/// Carrier assigned to shipments with a blank carrier field.
pub const DEFAULT_CARRIER: &str = "Correios";

/// Minimum similarity ratio for a fuzzy match to be accepted.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.6;

/// Keyword table for auto-categorizing products by name. Table order is the
/// precedence order: the first category with a matching keyword wins.
pub const CATEGORY_KEYWORDS: [(&str, &[&str]); 10] = [
    (
        "Eletrônicos",
        &["smartphone", "celular", "tablet", "tv", "televisão", "som", "fone"],
    ),
    (
        "Informática",
        &["notebook", "computador", "mouse", "teclado", "monitor", "impressora"],
    ),
    ("Casa", &["mesa", "cadeira", "sofá", "cama", "armário", "decoração"]),
    ("Moda", &["camisa", "calça", "vestido", "sapato", "tênis", "bolsa"]),
    ("Esportes", &["bola", "raquete", "bicicleta", "academia", "fitness"]),
    ("Livros", &["livro", "revista", "manual", "guia"]),
    ("Beleza", &["perfume", "maquiagem", "creme", "shampoo"]),
    ("Automotivo", &["pneu", "óleo", "bateria", "peça"]),
    ("Jardim", &["planta", "vaso", "terra", "adubo"]),
    ("Brinquedos", &["boneca", "carrinho", "jogo", "puzzle"]),
];

/// Substitution table for repairing truncated email domains. Applied in
/// order; a fix only fires when the broken form is present and the corrected
/// form is not, so already-correct addresses are never touched twice.
pub const EMAIL_DOMAIN_FIXES: [(&str, &str); 5] = [
    ("@gmail", "@gmail.com"),
    ("@hotmail", "@hotmail.com"),
    ("@yahoo", "@yahoo.com"),
    ("@outlook", "@outlook.com"),
    (".co", ".com"),
];

/// Tokens read as `true` when standardizing boolean columns.
pub const TRUTHY_TOKENS: [&str; 5] = ["true", "1", "sim", "yes", "ativo"];

/// Tokens read as `false` when standardizing boolean columns.
pub const FALSY_TOKENS: [&str; 5] = ["false", "0", "não", "no", "inativo"];

/// Marker written to the ledger when the previous value was absent.
pub const NULL_MARKER: &str = "NULL";

/// Marker written to the ledger when a record was removed outright.
pub const REMOVED_MARKER: &str = "REMOVED";
