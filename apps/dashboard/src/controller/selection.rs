//! Searchable multi-select used to pick the tasks of a new order.

use client_core::paging::matches_needle;
use shared::protocol::OptionItem;

#[derive(Debug, Clone)]
pub struct Selection<Id> {
    options: Vec<OptionItem<Id>>,
    selected: Vec<Id>,
    pub search: String,
}

impl<Id> Default for Selection<Id> {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            selected: Vec::new(),
            search: String::new(),
        }
    }
}

impl<Id: Clone + PartialEq> Selection<Id> {
    pub fn new(options: Vec<OptionItem<Id>>) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &[OptionItem<Id>] {
        &self.options
    }

    /// Replaces the options, keeping only selections that still exist.
    pub fn set_options(&mut self, options: Vec<OptionItem<Id>>) {
        self.selected
            .retain(|id| options.iter().any(|option| &option.id == id));
        self.options = options;
    }

    pub fn toggle(&mut self, id: &Id) {
        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
        } else if self.options.iter().any(|o| &o.id == id) {
            self.selected.push(id.clone());
        }
    }

    pub fn is_selected(&self, id: &Id) -> bool {
        self.selected.contains(id)
    }

    pub fn selected(&self) -> &[Id] {
        &self.selected
    }

    pub fn visible(&self) -> Vec<&OptionItem<Id>> {
        self.options
            .iter()
            .filter(|o| matches_needle(&o.label, &self.search))
            .collect()
    }

    pub fn label(&self) -> String {
        match self.selected.len() {
            0 => "Selecione os serviços...".to_string(),
            n => format!("{n} serviço(s) selecionado(s)"),
        }
    }
}
