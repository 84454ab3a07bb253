//! Codec listing.

use anyhow::Result;
use nomen_codec::{DocumentTableId, NameCodec, PrefixedFileName, WorkspaceName};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_output, OutputFormat};

/// One row of `nomen codecs`.
#[derive(Debug, Clone, Serialize, Tabled)]
struct CodecRow {
    #[tabled(rename = "Codec")]
    name: &'static str,

    #[tabled(rename = "Keys", display = "display_list")]
    keys: Vec<String>,

    #[tabled(rename = "Forced", display = "display_list")]
    forced: Vec<String>,
}

impl CodecRow {
    fn of<C: NameCodec>() -> Self {
        Self {
            name: C::NAME,
            keys: C::KEYS.iter().map(|k| k.to_string()).collect(),
            forced: C::FORCED.iter().map(|(k, v)| format!("{k}={v}")).collect(),
        }
    }
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        return "-".to_string();
    }
    items.join(", ")
}

pub fn run(format: OutputFormat) -> Result<()> {
    let rows = vec![
        CodecRow::of::<DocumentTableId>(),
        CodecRow::of::<WorkspaceName>(),
        CodecRow::of::<PrefixedFileName>(),
    ];
    print_output(&rows, format);
    Ok(())
}
