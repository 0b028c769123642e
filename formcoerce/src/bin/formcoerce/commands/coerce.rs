use anyhow::Result;
use clap::{Args, ValueEnum};
use comfy_table::Cell;
use formcoerce::{CoercionKind, EmptyStringNormalizer, Normalizer, NumericCoercer};
use serde::Serialize;
use serde_json::Value;

use crate::output::{GlobalOptions, OutputManager, TableDisplay, new_table};
use crate::utils::display_value;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CoerceMode {
    /// Numeric strings become numbers, blank strings become absent
    Numeric,
    /// Blank strings become absent
    Empty,
}

#[derive(Args)]
pub struct CoerceArgs {
    /// Coercion to apply
    #[arg(value_enum)]
    pub mode: CoerceMode,

    /// Raw string as a form would submit it
    #[arg(allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct CoercionReport {
    pub coercion: CoercionKind,
    pub input: String,
    /// `None` when the value is coerced to absent
    pub output: Option<Value>,
}

impl TableDisplay for CoercionReport {
    fn to_table(&self, options: &GlobalOptions) -> comfy_table::Table {
        let mut table = new_table(options, &["Coercion", "Input", "Output"]);
        table.add_row(vec![
            Cell::new(self.coercion.to_string()),
            Cell::new(format!("{:?}", self.input)),
            Cell::new(display_value(self.output.as_ref())),
        ]);
        table
    }

    fn to_compact(&self) -> String {
        display_value(self.output.as_ref())
    }
}

pub fn coerce_value(mode: CoerceMode, value: &str) -> CoercionReport {
    let raw = Some(Value::String(value.to_string()));
    let (coercion, output) = match mode {
        CoerceMode::Numeric => (NumericCoercer.kind(), NumericCoercer.normalize(raw)),
        CoerceMode::Empty => (EmptyStringNormalizer.kind(), EmptyStringNormalizer.normalize(raw)),
    };
    CoercionReport {
        coercion,
        input: value.to_string(),
        output,
    }
}

pub fn handle_coerce(args: CoerceArgs, output: &OutputManager) -> Result<()> {
    let report = coerce_value(args.mode, &args.value);
    output.display(&report)
}
