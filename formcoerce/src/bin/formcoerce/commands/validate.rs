use anyhow::{Result, anyhow, bail};
use clap::Args;
use comfy_table::Cell;
use formcoerce::{Schema, ValidationIssue};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::context::ConfigContext;
use crate::output::{GlobalOptions, OutputManager, TableDisplay, new_table};
use crate::utils::{build_submission, display_value, read_json_input};

#[derive(Args)]
pub struct ValidateArgs {
    /// Name of the form to validate against
    pub form: String,

    /// JSON file with the submission (`-` reads stdin)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Submitted field as KEY=VALUE (repeatable, values stay strings)
    #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

/// Outcome of validating one submission
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub form: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
}

impl TableDisplay for ValidationReport {
    fn to_table(&self, options: &GlobalOptions) -> comfy_table::Table {
        if let Some(values) = &self.values {
            let mut table = new_table(options, &["Field", "Value"]);
            for (field, value) in values {
                table.add_row(vec![Cell::new(field), Cell::new(display_value(Some(value)))]);
            }
            table
        } else {
            let mut table = new_table(options, &["Field", "Code", "Message"]);
            for issue in &self.issues {
                let field = if issue.field.is_empty() { "(form)" } else { issue.field.as_str() };
                table.add_row(vec![Cell::new(field), Cell::new(&issue.code), Cell::new(&issue.message)]);
            }
            table
        }
    }

    fn to_compact(&self) -> String {
        match &self.values {
            Some(values) => Value::Object(values.clone()).to_string(),
            None => self
                .issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

pub fn handle_validate(args: ValidateArgs, ctx: &ConfigContext, output: &OutputManager) -> Result<()> {
    let form = ctx.registry.get(&args.form).ok_or_else(|| {
        anyhow!(
            "Unknown form '{}' (available: {})",
            args.form,
            ctx.registry.names().collect::<Vec<_>>().join(", ")
        )
    })?;

    let input = args.input.as_deref().map(read_json_input).transpose()?;
    let submission = build_submission(input, &args.fields)?;
    output.detail(&format!(
        "Validating against '{}' from {}",
        form.name(),
        ctx.config_path.display()
    ));

    let report = match form.validate(Some(submission)) {
        Ok(values) => ValidationReport {
            form: form.name().to_string(),
            valid: true,
            values: Some(values),
            issues: Vec::new(),
        },
        Err(err) => ValidationReport {
            form: form.name().to_string(),
            valid: false,
            values: None,
            issues: err.issues,
        },
    };

    output.display(&report)?;

    if report.valid {
        output.success(&format!("Submission is valid for form '{}'", report.form));
        Ok(())
    } else {
        output.failure(&format!("Submission failed with {} issue(s)", report.issues.len()));
        bail!("Validation failed for form '{}'", report.form)
    }
}
