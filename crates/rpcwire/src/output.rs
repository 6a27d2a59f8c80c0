use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use rpcwire_frame::Message;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// What `decode --commands` learned about a message body.
#[derive(Debug, Serialize)]
pub struct CommandSummary {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CommandSummary {
    fn describe(&self) -> String {
        if let Some(error) = &self.error {
            return format!("{}: {error}", self.kind);
        }
        let mut text = self.kind.to_string();
        if let Some(method) = &self.method {
            text.push(' ');
            text.push_str(method);
        }
        if let Some(id) = &self.id {
            text.push_str(&format!(" #{id}"));
        }
        text
    }
}

#[derive(Serialize)]
struct MessageOutput<'a> {
    index: usize,
    content_length: usize,
    content_type: &'a str,
    headers: BTreeMap<&'a str, &'a str>,
    body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    command: Option<&'a CommandSummary>,
}

pub fn print_message(
    index: usize,
    message: &Message,
    command: Option<&CommandSummary>,
    format: OutputFormat,
) {
    match format {
        OutputFormat::Json => {
            let out = MessageOutput {
                index,
                content_length: message.body().len(),
                content_type: message.content_type(),
                headers: message.header().iter().collect(),
                body: body_preview(message.body()),
                command,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut header = vec!["#", "LENGTH", "CONTENT-TYPE"];
            let mut row = vec![
                index.to_string(),
                message.body().len().to_string(),
                message.content_type().to_string(),
            ];
            if let Some(command) = command {
                header.push("COMMAND");
                row.push(command.describe());
            }
            header.push("BODY");
            row.push(body_preview(message.body()));

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(header)
                .add_row(row);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let command = command
                .map(|c| format!(" command=[{}]", c.describe()))
                .unwrap_or_default();
            println!(
                "#{index} length={} type={}{command} body={}",
                message.body().len(),
                message.content_type(),
                body_preview(message.body())
            );
        }
        OutputFormat::Raw => {
            print_raw(message.body());
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn body_preview(body: &[u8]) -> String {
    match std::str::from_utf8(body) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", body.len()),
    }
}
