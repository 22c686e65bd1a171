//! Plain-text rendering of the listing screens for the terminal.

use std::fmt;

use client_core::paging::Pager;
use shared::domain::{Customer, Machine, Order, Piece, Task, User};

use crate::controller::home::OrderCard;

pub struct Table {
    headers: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<&'static str>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, cells: Vec<String>) -> &mut Self {
        self.rows.push(cells);
        self
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }
        widths
    }
}

fn write_line<S: AsRef<str>>(f: &mut fmt::Formatter<'_>, cells: &[S], widths: &[usize]) -> fmt::Result {
    let line: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).map(|c| c.as_ref()).unwrap_or_default();
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    writeln!(f, "{}", line.join(" | ").trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write_line(f, &self.headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;
        if self.rows.is_empty() {
            return writeln!(f, "(nenhum registro)");
        }
        for row in &self.rows {
            write_line(f, row, &widths)?;
        }
        Ok(())
    }
}

pub fn money(value: f64) -> String {
    format!("R$ {value:.2}")
}

pub fn pager(pager: Pager) -> String {
    if pager.total_pages == 0 {
        return "página 0/0".to_string();
    }
    format!("página {}", pager.label())
}

pub fn customers(rows: &[&Customer]) -> Table {
    let mut table = Table::new(vec!["ID", "Nome", "CPF", "Telefone", "Email", "Endereço"]);
    for c in rows {
        table.row(vec![
            c.id.to_string(),
            c.name.clone(),
            c.cpf.clone(),
            c.phone.clone(),
            c.email.clone(),
            c.address.clone(),
        ]);
    }
    table
}

pub fn users(rows: &[&User]) -> Table {
    let mut table = Table::new(vec!["ID", "Username", "Email"]);
    for u in rows {
        table.row(vec![u.id.to_string(), u.username.clone(), u.email.clone()]);
    }
    table
}

pub fn machines(rows: &[&Machine]) -> Table {
    let mut table = Table::new(vec!["ID", "Modelo", "Marca", "Categoria", "Cliente"]);
    for m in rows {
        table.row(vec![
            m.id.to_string(),
            m.model.clone(),
            m.brand.clone(),
            m.category.as_str().to_string(),
            m.customer.name.clone(),
        ]);
    }
    table
}

pub fn pieces(rows: &[&Piece]) -> Table {
    let mut table = Table::new(vec!["ID", "Nome", "Marca", "Preço"]);
    for p in rows {
        table.row(vec![
            p.id.to_string(),
            p.name.clone(),
            p.brand.clone(),
            money(p.price),
        ]);
    }
    table
}

pub fn tasks(rows: &[&Task]) -> Table {
    let mut table = Table::new(vec!["ID", "Serviço", "Máquina", "Cliente", "Preço"]);
    for t in rows {
        table.row(vec![
            t.id.to_string(),
            t.name.clone(),
            t.machine.model.clone(),
            t.customer_name().unwrap_or_default().to_string(),
            money(t.price),
        ]);
    }
    table
}

pub fn orders(rows: &[Order]) -> Table {
    let mut table = Table::new(vec!["Pedido", "Descrição", "Status", "Serviços", "Total"]);
    for o in rows {
        table.row(vec![
            o.order_id.to_string(),
            o.description.clone(),
            o.status.label().to_string(),
            o.task_names().join(", "),
            money(o.total()),
        ]);
    }
    table
}

impl fmt::Display for OrderCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pedido #{}", self.order_id)?;
        writeln!(f, "  Máquina: {}", self.machine)?;
        writeln!(f, "  Cliente: {}", self.customer)?;
        writeln!(f, "  Data de Entrada: {}", self.entry_date.format("%Y-%m-%d"))?;
        writeln!(f, "  Status: {}", self.status)?;
        writeln!(f, "  Serviço: {}", self.services.join(", "))?;
        writeln!(f, "  Peça(s): {}", self.pieces.join(", "))
    }
}
