use anyhow::{Result, anyhow};
use clap::Subcommand;
use comfy_table::Cell;
use formcoerce::{FieldDescriptor, FormSchema, Schema};
use serde::Serialize;

use crate::context::ConfigContext;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, new_table};

#[derive(Subcommand)]
pub enum FormsCommands {
    /// List configured forms
    #[command(name = "list")]
    List,

    /// Show the fields of one form
    #[command(name = "show")]
    Show {
        /// Form name
        name: String,
    },
}

#[derive(Debug, Serialize)]
pub struct FormSummary {
    pub name: String,
    pub description: Option<String>,
    pub fields: usize,
}

impl FormSummary {
    fn from_form(form: &FormSchema) -> Self {
        Self {
            name: form.name().to_string(),
            description: form.description().map(str::to_string),
            fields: form.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormList(pub Vec<FormSummary>);

impl TableDisplay for FormList {
    fn to_table(&self, options: &GlobalOptions) -> comfy_table::Table {
        let mut table = new_table(options, &["Form", "Fields", "Description"]);
        for summary in &self.0 {
            table.add_row(vec![
                Cell::new(&summary.name),
                Cell::new(summary.fields.to_string()),
                Cell::new(summary.description.as_deref().unwrap_or("")),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        self.0
            .iter()
            .map(|summary| summary.name.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Serialize)]
pub struct FormDetail {
    pub name: String,
    pub description: Option<String>,
    pub fields: Vec<FieldDescriptor>,
}

impl TableDisplay for FormDetail {
    fn to_table(&self, options: &GlobalOptions) -> comfy_table::Table {
        let mut table = new_table(options, &["Field", "Kind", "Required", "Coercion", "Rules"]);
        for field in &self.fields {
            let rules = field
                .rules
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            table.add_row(vec![
                Cell::new(&field.name),
                Cell::new(field.kind.to_string()),
                Cell::new(if field.required { "yes" } else { "no" }),
                Cell::new(field.coercion.to_string()),
                Cell::new(rules),
            ]);
        }
        table
    }

    fn to_compact(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|field| {
                let marker = if field.required { "" } else { "?" };
                format!("{}{marker}:{}", field.name, field.kind)
            })
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} {fields}", self.name)
    }
}

pub fn handle_forms_commands(command: FormsCommands, ctx: &ConfigContext, output: &OutputManager) -> Result<()> {
    match command {
        FormsCommands::List => {
            if ctx.registry.is_empty() {
                output.warning(&format!("No forms defined in {}", ctx.config_path.display()));
                return Ok(());
            }
            let list = FormList(ctx.registry.forms().map(FormSummary::from_form).collect());
            output.note(&format!(
                "{} form(s) from {}",
                list.0.len(),
                ctx.config_path.display()
            ));
            output.display(&list)
        }
        FormsCommands::Show { name } => {
            let form = ctx
                .registry
                .get(&name)
                .ok_or_else(|| anyhow!("Unknown form '{name}'"))?;
            let descriptor = form.descriptor();
            let detail = FormDetail {
                name: descriptor.name,
                description: form.description().map(str::to_string),
                fields: descriptor.fields,
            };

            match &detail.description {
                Some(description) => output.note(&format!("{}: {description}", detail.name)),
                None => output.note(&detail.name),
            }
            output.display(&detail)
        }
    }
}
