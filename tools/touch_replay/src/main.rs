use std::{
    env,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
};

use f1c100s_drivers::sim::SimTouchRegisters;
use f1c100s_drivers::touch::regs::{FIFO_DATA_PENDING, TEMP_DATA_PENDING};
use f1c100s_drivers::touch::{SharedTouchPanel, TouchConfig, TouchPanel, TouchSample};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReplayStep {
    Irq {
        status: u32,
        words: Option<(u32, u32)>,
        temperature: Option<u32>,
    },
    Read,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let mut trace_path: Option<PathBuf> = None;
    let mut expect_path: Option<PathBuf> = None;
    let mut touch_down_irq = false;

    let mut idx = 1usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--expect" => {
                idx += 1;
                let Some(path) = args.get(idx) else {
                    return Err("missing path after --expect".into());
                };
                expect_path = Some(PathBuf::from(path));
            }
            "--touch-down-irq" => touch_down_irq = true,
            "-h" | "--help" => {
                println!("{}", usage());
                return Ok(());
            }
            value if value.starts_with('-') => {
                return Err(format!("unknown argument: {value}"));
            }
            value => {
                if trace_path.is_some() {
                    return Err("multiple trace paths provided".into());
                }
                trace_path = Some(PathBuf::from(value));
            }
        }
        idx += 1;
    }

    let trace_path = trace_path.ok_or_else(usage)?;
    let steps = parse_trace(&trace_path)?;

    let config = TouchConfig {
        touch_down_irq,
        ..TouchConfig::default()
    };
    let mut panel = TouchPanel::new(SimTouchRegisters::new(), config);
    panel
        .init()
        .map_err(|e| format!("touch init failed: {e}"))?;

    let shared = SharedTouchPanel::new();
    shared.install(panel);

    let mut outputs: Vec<String> = Vec::new();
    for step in steps {
        match step {
            ReplayStep::Irq {
                status,
                words,
                temperature,
            } => {
                shared.with(|panel| {
                    let regs = panel.registers_mut();
                    if let Some((x, y)) = words {
                        regs.push_word(x);
                        regs.push_word(y);
                    }
                    if let Some(code) = temperature {
                        regs.inject_temperature(code);
                    }
                    regs.raise(status);
                });
                shared.on_interrupt();
            }
            ReplayStep::Read => outputs.push(point_label(shared.read_point())),
        }
    }

    for line in &outputs {
        println!("{line}");
    }
    if let Some(stats) = shared.stats() {
        eprintln!(
            "stats,data_events={},discarded={},accepted={},touch_ups={},touch_downs={},overruns={},unhandled={}",
            stats.data_events,
            stats.discarded,
            stats.accepted,
            stats.touch_ups,
            stats.touch_downs,
            stats.overruns,
            stats.unhandled
        );
    }

    if let Some(expect_path) = expect_path {
        let expected = parse_expected(&expect_path)?;
        if outputs != expected {
            eprintln!("expected: {}", expected.join(" "));
            eprintln!("actual:   {}", outputs.join(" "));
            return Err("read sequence mismatch".into());
        }
    }

    Ok(())
}

fn usage() -> String {
    "usage: touch_replay <trace.csv> [--expect expected.txt] [--touch-down-irq]".to_string()
}

fn point_label(point: Option<TouchSample>) -> String {
    match point {
        Some(p) => format!("point,{},{}", p.x, p.y),
        None => "none".to_string(),
    }
}

/// Trace lines are `irq,status,word0,word1[,temp]` or `read`.
/// Words are only queued when `status` carries the data-pending bit.
fn parse_trace(path: &Path) -> Result<Vec<ReplayStep>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    parse_trace_lines(BufReader::new(file), path)
}

fn parse_trace_lines(reader: impl BufRead, path: &Path) -> Result<Vec<ReplayStep>, String> {
    let mut out = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        match parts[0] {
            "read" => out.push(ReplayStep::Read),
            "irq" => {
                if parts.len() < 4 {
                    return Err(format!(
                        "{}:{} invalid irq line, expected irq,status,word0,word1[,temp]",
                        path.display(),
                        line_no
                    ));
                }
                let status = parse_u32(parts[1], path, line_no, "status")?;
                let word0 = parse_u32(parts[2], path, line_no, "word0")?;
                let word1 = parse_u32(parts[3], path, line_no, "word1")?;
                let temperature = match parts.get(4) {
                    Some(raw) => Some(parse_u32(raw, path, line_no, "temp")?),
                    None => None,
                };
                if status & TEMP_DATA_PENDING != 0 && temperature.is_none() {
                    return Err(format!(
                        "{}:{} status 0x{:x} has the temperature bit but no temp column",
                        path.display(),
                        line_no,
                        status
                    ));
                }
                out.push(ReplayStep::Irq {
                    status: status & !TEMP_DATA_PENDING,
                    words: (status & FIFO_DATA_PENDING != 0).then_some((word0, word1)),
                    temperature: temperature.filter(|_| status & TEMP_DATA_PENDING != 0),
                });
            }
            other => {
                return Err(format!(
                    "{}:{} unknown step '{}'",
                    path.display(),
                    line_no,
                    other
                ));
            }
        }
    }

    Ok(out)
}

fn parse_expected(path: &Path) -> Result<Vec<String>, String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line = line_result
            .map_err(|e| format!("failed to read {}:{}: {e}", path.display(), line_no))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        if token != "none" && !token.starts_with("point,") {
            return Err(format!(
                "{}:{} invalid expected read: {}",
                path.display(),
                line_no,
                token
            ));
        }
        lines.push(token.replace(' ', ""));
    }

    Ok(lines)
}

/// Accepts decimal or `0x`-prefixed hex.
fn parse_u32(raw: &str, path: &Path, line_no: usize, field: &str) -> Result<u32, String> {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => raw.parse::<u32>(),
    };
    parsed.map_err(|e| {
        format!(
            "{}:{} invalid {} '{}': {}",
            path.display(),
            line_no,
            field,
            raw,
            e
        )
    })
}
