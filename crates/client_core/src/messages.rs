//! Server error payloads translated into the dashboard's user-facing text.

use shared::error::ErrorBody;

use crate::error::{ActionError, ClientError};

pub const GENERIC_ERROR: &str = "Error inesperado";

/// What to show when no field or conflict entry matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Always the fixed text.
    Fixed(&'static str),
    /// The server's own message if it sent one, else the fixed text.
    ServerMessageOr(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    /// Checked in order; the first flagged field wins.
    pub fields: &'static [(&'static str, &'static str)],
    pub conflicts: &'static [(&'static str, &'static str)],
    pub fallback: Fallback,
}

impl Catalog {
    pub fn translate(&self, body: &ErrorBody) -> String {
        let priority: Vec<&str> = self.fields.iter().map(|(field, _)| *field).collect();
        if let Some(field) = body.first_flagged(&priority) {
            if let Some((_, text)) = self.fields.iter().find(|(f, _)| *f == field) {
                return (*text).to_string();
            }
        }

        let message = body.message.as_deref().unwrap_or_default();
        if let Some((_, text)) = self.conflicts.iter().find(|(raw, _)| *raw == message) {
            return (*text).to_string();
        }

        match self.fallback {
            Fallback::Fixed(text) => text.to_string(),
            Fallback::ServerMessageOr(text) if message.is_empty() => text.to_string(),
            Fallback::ServerMessageOr(_) => message.to_string(),
        }
    }

    /// Maps any client failure to the action outcome a screen displays.
    pub fn reject(&self, err: ClientError) -> ActionError {
        match err {
            ClientError::Unauthorized => ActionError::Unauthorized,
            ClientError::Status { body, .. } => ActionError::Rejected(self.translate(&body)),
            _ => ActionError::Rejected(self.translate(&ErrorBody::default())),
        }
    }
}

pub const CUSTOMER: Catalog = Catalog {
    fields: &[
        ("name", "O nome é obrigatório"),
        ("cpf", "O cpf deve ter exatamente 11 dígitos"),
        ("phone", "O telefone deve ter entre 1 à 20 dígitos"),
        ("email", "O email deve ser válido"),
        ("address", "O endereço é obrigatório"),
    ],
    conflicts: &[(
        "A customer with this cpf, phone or email already exists.",
        "Um cliente com esse cpf, telefone ou email já existe",
    )],
    fallback: Fallback::Fixed(GENERIC_ERROR),
};

pub const USER: Catalog = Catalog {
    fields: &[
        ("username", "O username deve ter entre 5 e 20 caracteres"),
        ("email", "O email deve ser válido"),
    ],
    conflicts: &[
        (
            "A user with this username already exists.",
            "Já existe um usuário com esse username",
        ),
        (
            "A user with this email already exists.",
            "Já existe um usuário com esse email",
        ),
    ],
    fallback: Fallback::Fixed(GENERIC_ERROR),
};

pub const PASSWORD: Catalog = Catalog {
    fields: &[("newPassword", "A nova senha deve ter entre 5 e 20 caracteres")],
    conflicts: &[("Old password is incorrect.", "Senha antiga está incorreta")],
    fallback: Fallback::Fixed(GENERIC_ERROR),
};

pub const PASSWORD_MISMATCH: &str = "A senha está diferente";

pub const MACHINE_CREATE: Catalog = Catalog {
    fields: &[],
    conflicts: &[],
    fallback: Fallback::ServerMessageOr("Erro ao criar máquina. Verifique os dados."),
};

pub const MACHINE_UPDATE: Catalog = Catalog {
    fields: &[],
    conflicts: &[],
    fallback: Fallback::ServerMessageOr("Erro ao atualizar máquina."),
};

pub const TASK_CREATE: Catalog = Catalog {
    fields: &[],
    conflicts: &[],
    fallback: Fallback::ServerMessageOr("Erro ao criar serviço. Verifique os dados."),
};

pub const TASK_UPDATE: Catalog = Catalog {
    fields: &[],
    conflicts: &[],
    fallback: Fallback::ServerMessageOr("Erro ao atualizar serviço."),
};

pub const PIECE: Catalog = Catalog {
    fields: &[],
    conflicts: &[],
    fallback: Fallback::ServerMessageOr("Erro ao salvar peça."),
};

pub const ORDER_CREATE: Catalog = Catalog {
    fields: &[],
    conflicts: &[],
    fallback: Fallback::Fixed("Erro ao criar pedido"),
};

pub const LOGIN_INVALID: &str = "Usuário ou senha invalido";
pub const LOGIN_UNEXPECTED: &str = "Aconteceu um error inesperado";

pub fn login_error(server_error: &str) -> &'static str {
    if server_error == "Invalid credentials" {
        LOGIN_INVALID
    } else {
        LOGIN_UNEXPECTED
    }
}

#[cfg(test)]
#[path = "tests/messages_tests.rs"]
mod tests;
