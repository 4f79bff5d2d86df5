// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! rowsql CLI - evaluate a select list over newline-delimited JSON rows
//!

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

use rowsql::{ColumnGroupBy, Error, NumericPolicy, ResultSet, Row, SelectConfig, SelectList};

/// rowsql select-list evaluator
#[derive(Parser, Debug)]
#[command(name = "rowsql")]
#[command(author = "Stoolap Contributors")]
#[command(version)]
#[command(about = "Evaluate a SQL select list over newline-delimited JSON rows")]
#[command(
    long_about = "Reads one JSON object per line from a file or stdin and evaluates a SQL\n\
select list over them, with optional GROUP BY columns.\n\n\
EXAMPLES:\n\
  rowsql -s 'name, age' people.ndjson\n\
  rowsql -s 'dept, AVG(age), COUNT(*) AS n' -g dept people.ndjson\n\
  cat people.ndjson | rowsql -s 'SUM(DISTINCT amount) AS total' --json"
)]
struct Args {
    /// Select list to evaluate
    #[arg(short = 's', long = "select")]
    select: String,

    /// Comma-separated GROUP BY columns
    #[arg(short = 'g', long = "group-by", value_name = "COLUMNS")]
    group_by: Option<String>,

    /// Input file with one JSON object per line (stdin when omitted)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", default_value = "false")]
    json_output: bool,

    /// Fail on malformed select lists instead of recovering
    #[arg(long = "strict", default_value = "false")]
    strict: bool,

    /// Fail when SUM or AVG meets a non-numeric value
    #[arg(long = "reject-non-numeric", default_value = "false")]
    reject_non_numeric: bool,

    /// Maximum number of rows to display (0 for unlimited)
    #[arg(short = 'l', long = "limit", default_value = "40")]
    limit: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let policy = if args.reject_non_numeric {
        NumericPolicy::Reject
    } else {
        NumericPolicy::Coerce
    };
    let config = SelectConfig::new()
        .with_strict(args.strict)
        .with_numeric_policy(policy);

    let mut list = SelectList::parse_with_config(&args.select, config).map_err(|e| match e {
        Error::Parse(err) => err.format_error(),
        other => other.to_string(),
    })?;
    if let Some(ref columns) = args.group_by {
        let provider = ColumnGroupBy::parse(columns);
        if provider.columns().is_empty() {
            return Err("--group-by needs at least one column".to_string());
        }
        list.set_group_by(Arc::new(provider));
    }

    let rows = match args.input {
        Some(ref path) => {
            let file = File::open(path).map_err(|e| format!("{}: {}", path, e))?;
            read_rows(BufReader::new(file))?
        }
        None => read_rows(io::stdin().lock())?,
    };

    let start = Instant::now();
    let result = list.execute(&rows).map_err(|e| e.to_string())?;
    let elapsed = start.elapsed();

    if args.json_output {
        output_json(&result)
    } else {
        output_table(&result, args.limit);
        println!(
            "\x1b[1;32m{} {} in set ({:.3}s)\x1b[0m",
            result.len(),
            if result.len() == 1 { "row" } else { "rows" },
            elapsed.as_secs_f64()
        );
        Ok(())
    }
}

/// Read one JSON object per line; blank lines are skipped
fn read_rows(reader: impl BufRead) -> Result<Vec<Row>, String> {
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| e.to_string())?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let json: serde_json::Value =
            serde_json::from_str(line).map_err(|e| format!("line {}: {}", i + 1, e))?;
        rows.push(Row::from_json(&json).map_err(|e| format!("line {}: {}", i + 1, e))?);
    }
    log::debug!("Read {} input rows", rows.len());
    Ok(rows)
}

fn output_json(result: &ResultSet) -> Result<(), String> {
    println!(
        "{}",
        serde_json::to_string(&result.to_json()).map_err(|e| e.to_string())?
    );
    Ok(())
}

fn output_table(result: &ResultSet, limit: usize) {
    let columns = result.columns();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(columns.iter().map(Cell::new));

    let shown = if limit > 0 { limit.min(result.len()) } else { result.len() };
    for row in result.iter().take(shown) {
        table.add_row(columns.iter().map(|column| {
            Cell::new(
                row.get(column)
                    .map(|value| value.to_string())
                    .unwrap_or_default(),
            )
        }));
    }
    if shown < result.len() {
        let message = format!("... ({} more rows) ...", result.len() - shown);
        table.add_row(
            (0..columns.len()).map(|i| Cell::new(if i == 0 { message.as_str() } else { "" })),
        );
    }

    println!("{table}");
}
