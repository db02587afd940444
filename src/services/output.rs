use crate::domain::models::{Delivery, JsonOut, RenderReport};
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

/// Tab-separated text line for one delivered mode.
pub fn report_row(r: &RenderReport) -> String {
    let mut line = match r.outcome {
        Delivery::Wrote => format!(
            "{}\twrote\t{}",
            r.mode.name(),
            r.path.as_deref().unwrap_or("-")
        ),
        Delivery::Displayed => format!("{}\tdisplayed", r.mode.name()),
    };
    line.push_str(&format!("\t{} observations", r.observations));
    if let Some(level) = r.exposure_level {
        line.push_str(&format!("\texposure={}", level));
    }
    line
}
