use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: u32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub registered_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub created_at: Option<String>,
    pub active: ActiveFlag,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: u32,
    pub customer_id: u32,
    pub product_id: u32,
    pub quantity: i64,
    pub unit_price: f64,
    pub total: f64,
    pub sale_date: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: u32,
    pub sale_id: u32,
    pub carrier: Option<String>,
    pub ship_date: Option<String>,
    pub delivered_at: Option<String>,
    pub status: Option<String>,
}

/// Boolean column that may still carry raw source tokens (`sim`, `1`,
/// `inativo`, ...). Already-normalized values round-trip as `true`/`false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFlag {
    Bool(bool),
    Text(String),
}

impl ActiveFlag {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "true" => ActiveFlag::Bool(true),
            "false" => ActiveFlag::Bool(false),
            other => ActiveFlag::Text(other.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ActiveFlag::Bool(b) => Some(*b),
            ActiveFlag::Text(_) => None,
        }
    }
}

impl fmt::Display for ActiveFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveFlag::Bool(b) => write!(f, "{}", b),
            ActiveFlag::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for ActiveFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ActiveFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ActiveFlag::from_raw(&raw))
    }
}

/// Which of the four datasets a correction touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Customers,
    Products,
    Sales,
    Shipments,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Customers => "customers",
            Entity::Products => "products",
            Entity::Sales => "sales",
            Entity::Shipments => "shipments",
        };
        f.write_str(name)
    }
}

/// The four record collections handled together by a correction run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasets {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub shipments: Vec<Shipment>,
}

/// Records carrying a numeric primary key. Duplicate-id removal is generic
/// over this.
pub trait Keyed {
    fn id(&self) -> u32;
}

impl Keyed for Customer {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Keyed for Product {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Keyed for Sale {
    fn id(&self) -> u32 {
        self.id
    }
}

impl Keyed for Shipment {
    fn id(&self) -> u32 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_flag_recognizes_normalized_tokens() {
        assert_eq!(ActiveFlag::from_raw("true"), ActiveFlag::Bool(true));
        assert_eq!(ActiveFlag::from_raw("false"), ActiveFlag::Bool(false));
        assert_eq!(
            ActiveFlag::from_raw("sim"),
            ActiveFlag::Text("sim".to_string())
        );
    }

    #[test]
    fn active_flag_displays_raw_token() {
        assert_eq!(ActiveFlag::Bool(true).to_string(), "true");
        assert_eq!(ActiveFlag::Text("Ativo".to_string()).to_string(), "Ativo");
    }

    #[test]
    fn entity_display_is_lowercase() {
        assert_eq!(Entity::Customers.to_string(), "customers");
        assert_eq!(Entity::Shipments.to_string(), "shipments");
    }
}
