use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    CustomerId, MachineCategory, MachineId, OrderId, OrderStatus, PieceId, TaskId, TaskStatus,
};

/// Spring-style page envelope returned by every listing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
}

/// What a listing screen keeps from a page fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            content: Vec::new(),
            total_pages: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<PageData<T>> for Page<T> {
    fn from(value: PageData<T>) -> Self {
        Self {
            content: value.content,
            total_pages: value.total_pages,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRef {
    pub id: TaskId,
}

/// Order as returned by `GET /orders`, tasks by reference only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub order_id: OrderId,
    #[serde(default)]
    pub description: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tasks: Vec<TaskRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    pub name: String,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl CustomerForm {
    /// Trims every field the way the server expects them.
    pub fn trimmed(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            cpf: self.cpf.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            address: self.address.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MachineId>,
    pub model: String,
    pub brand: String,
    pub category: MachineCategory,
    pub description: String,
    #[serde(rename = "customerID")]
    pub customer_id: CustomerId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PieceForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PieceId>,
    pub name: String,
    pub price: f64,
    pub brand: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub status: TaskStatus,
    pub machine_id: MachineId,
    pub pieces_id: Vec<PieceId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub description: String,
    pub task_ids: Vec<TaskId>,
}

/// Entry of a select box (machine owner, task machine, task pieces).
#[derive(Debug, Clone, PartialEq)]
pub struct OptionItem<Id> {
    pub id: Id,
    pub label: String,
    pub price: Option<f64>,
}
