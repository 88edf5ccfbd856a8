use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use regex::Regex;

use crate::sample;
use crate::table::Table;
use crate::workbook::{self, SheetSummary};

pub const CONFIG_FILE: &str = "template_config.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "templates";

const USAGE: &str = "usage: belofte-template [bulk|customers|suppliers] [OUTPUT_DIR]

Writes <OUTPUT_DIR>/<prefix>_<YYYYMMDD>.xlsx (default OUTPUT_DIR: ./templates).
Defaults can be set in template_config.txt (keys: kind, output_dir, prefix).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateKind {
    #[default]
    Bulk,
    Customers,
    Suppliers,
}

impl TemplateKind {
    pub fn prefix(self) -> &'static str {
        match self {
            TemplateKind::Bulk => "Belofte_Import_Template",
            TemplateKind::Customers => "Customer_Import_Template",
            TemplateKind::Suppliers => "Supplier_Import_Template",
        }
    }

    /// Worksheets in output order, instructions last.
    pub fn tables(self, today: NaiveDate) -> Vec<Table> {
        match self {
            TemplateKind::Bulk => sample::bulk_tables(today),
            TemplateKind::Customers => sample::customer_tables(),
            TemplateKind::Suppliers => sample::supplier_tables(),
        }
    }
}

impl FromStr for TemplateKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bulk" => Ok(TemplateKind::Bulk),
            "customers" | "customer" => Ok(TemplateKind::Customers),
            "suppliers" | "supplier" => Ok(TemplateKind::Suppliers),
            other => Err(anyhow!(
                "unknown template kind: {other} (expected bulk, customers or suppliers)"
            )),
        }
    }
}

pub fn file_name(prefix: &str, today: NaiveDate) -> String {
    format!("{prefix}_{}.xlsx", today.format("%Y%m%d"))
}

/// Replaces anything outside `[A-Za-z0-9_-]` with `_`. Blank input means
/// "use the kind's default prefix".
pub fn sanitize_prefix(raw: &str) -> Result<Option<String>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let re = Regex::new(r"[^A-Za-z0-9_-]+").context("cannot compile prefix pattern")?;
    Ok(Some(re.replace_all(raw, "_").to_string()))
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateConfig {
    pub kind: TemplateKind,
    pub output_dir: PathBuf,
    /// Overrides the kind's file name prefix.
    pub prefix: Option<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        TemplateConfig {
            kind: TemplateKind::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            prefix: None,
        }
    }
}

impl TemplateConfig {
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(self.kind.prefix())
    }

    pub fn output_path(&self, today: NaiveDate) -> PathBuf {
        self.output_dir.join(file_name(self.prefix(), today))
    }

    /// `key = value` lines; blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> Result<Self> {
        let mut config = TemplateConfig::default();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| anyhow!("line {}: expected key = value", index + 1))?;
            let value = value.trim();
            match key.trim() {
                "kind" => {
                    config.kind = value
                        .parse()
                        .with_context(|| format!("line {}", index + 1))?;
                }
                "output_dir" => config.output_dir = PathBuf::from(value),
                "prefix" => config.prefix = sanitize_prefix(value)?,
                other => return Err(anyhow!("line {}: unknown key {other}", index + 1)),
            }
        }
        Ok(config)
    }

    /// Missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(TemplateConfig::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read config file: {}", path.display()))?;
        TemplateConfig::parse(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }
}

#[derive(Debug, Clone)]
pub struct TemplateReport {
    pub path: PathBuf,
    pub styled: bool,
    /// Non-fatal problems after the workbook was written, in order.
    pub warnings: Vec<String>,
    /// Empty when the workbook could not be read back.
    pub sheets: Vec<SheetSummary>,
}

/// Runs the whole build with `styler` as the formatting pass. Table and
/// write errors abort. Once the workbook is on disk nothing is fatal: a
/// styler or read-back error is recorded in the report and the file is kept.
pub fn generate_with<F>(
    config: &TemplateConfig,
    today: NaiveDate,
    styler: F,
) -> Result<TemplateReport>
where
    F: FnOnce(&Path) -> Result<()>,
{
    let tables = config.kind.tables(today);

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("cannot create output directory: {}", config.output_dir.display())
    })?;
    let path = config.output_path(today);

    workbook::write_tables(&path, &tables)
        .with_context(|| format!("cannot write template: {}", path.display()))?;

    let mut warnings = Vec::new();
    let styled = match styler(&path) {
        Ok(()) => true,
        Err(err) => {
            warnings.push(format!("could not format Excel file: {err:#}"));
            false
        }
    };
    let sheets = workbook::summarize(&path).unwrap_or_else(|err| {
        warnings.push(format!("could not read back workbook: {err:#}"));
        Vec::new()
    });

    Ok(TemplateReport {
        path,
        styled,
        warnings,
        sheets,
    })
}

pub fn generate(config: &TemplateConfig, today: NaiveDate) -> Result<TemplateReport> {
    generate_with(config, today, workbook::style_headers)
}

pub fn run(args: impl IntoIterator<Item = OsString>) -> Result<()> {
    run_from(args, Path::new(CONFIG_FILE))
}

fn run_from(args: impl IntoIterator<Item = OsString>, config_path: &Path) -> Result<()> {
    let mut args = args.into_iter();
    let _exe = args.next();

    let kind = args.next().map(|a| a.to_string_lossy().into_owned());
    if matches!(kind.as_deref(), Some("-h" | "--help")) {
        println!("{USAGE}");
        return Ok(());
    }
    let output_dir = args.next().map(PathBuf::from);
    if let Some(extra) = args.next() {
        return Err(anyhow!("unexpected argument: {}\n{USAGE}", extra.to_string_lossy()));
    }

    let mut config = TemplateConfig::load(config_path)?;
    if let Some(kind) = kind {
        config.kind = kind.parse()?;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    let report = generate(&config, Local::now().date_naive())?;

    for warning in &report.warnings {
        eprintln!("Warning: {warning}");
    }
    println!("Excel template created successfully: {}", report.path.display());
    for sheet in &report.sheets {
        println!("  {:<28} {} rows", sheet.name, sheet.data_rows);
    }
    Ok(())
}
