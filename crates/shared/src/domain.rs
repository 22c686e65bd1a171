use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(CustomerId, String);
id_newtype!(UserId, String);
id_newtype!(MachineId, String);
id_newtype!(TaskId, String);
id_newtype!(PieceId, i64);
id_newtype!(OrderId, i64);

impl Copy for PieceId {}
impl Copy for OrderId {}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineCategory {
    PowerTool,
    HomeAppliance,
    SmallAppliance,
    BeautySalon,
}

impl MachineCategory {
    pub const ALL: [MachineCategory; 4] = [
        MachineCategory::PowerTool,
        MachineCategory::HomeAppliance,
        MachineCategory::SmallAppliance,
        MachineCategory::BeautySalon,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MachineCategory::PowerTool => "POWER_TOOL",
            MachineCategory::HomeAppliance => "HOME_APPLIANCE",
            MachineCategory::SmallAppliance => "SMALL_APPLIANCE",
            MachineCategory::BeautySalon => "BEAUTY_SALON",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Canceled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open,
    Close,
}

impl OrderStatus {
    /// Label shown in order tables and home cards.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Open => "Aberto",
            OrderStatus::Close => "Finalizado",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Owner reference embedded in machines and task details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    pub model: String,
    pub brand: String,
    pub category: MachineCategory,
    pub description: String,
    pub customer: CustomerRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub name: String,
    pub price: f64,
    pub brand: String,
    pub description: String,
}

/// Machine as embedded in a task detail.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MachineRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MachineId>,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieceRef {
    pub id: PieceId,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub machine: MachineRef,
    #[serde(default)]
    pub pieces: Vec<PieceRef>,
}

impl Task {
    pub fn customer_name(&self) -> Option<&str> {
        self.machine.customer.as_ref().map(|c| c.name.as_str())
    }
}

/// Order with every task expanded to its full detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    #[serde(default)]
    pub description: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Order {
    /// Sum of the task prices. Never stored server-side.
    pub fn total(&self) -> f64 {
        self.tasks.iter().map(|t| t.price).sum()
    }

    pub fn first_task(&self) -> Option<&Task> {
        self.tasks.first()
    }

    /// Distinct task names in first-seen order.
    pub fn task_names(&self) -> Vec<&str> {
        distinct(self.tasks.iter().map(|t| t.name.as_str()))
    }

    /// Distinct piece names across all tasks in first-seen order.
    pub fn piece_names(&self) -> Vec<&str> {
        distinct(
            self.tasks
                .iter()
                .flat_map(|t| t.pieces.iter().map(|p| p.name.as_str())),
        )
    }
}

fn distinct<'a>(items: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
