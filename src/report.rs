use crate::enrich::EnrichmentRecord;
use console::{style, Style};
use std::io::{self, Write};

/// Styles used by the report, built once at startup.
#[derive(Debug, Clone)]
pub struct Palette {
  pub label: Style,
  pub address: Style,
  pub value: Style,
  pub error: Style,
  pub notice: Style,
}

impl Palette {
  /// Cyan labels, yellow addresses, green values, red errors. Colors are
  /// dropped automatically when stdout is not a terminal.
  #[must_use]
  pub fn colored() -> Self {
    Self {
      label: Style::new().cyan(),
      address: Style::new().yellow(),
      value: Style::new().green(),
      error: Style::new().red(),
      notice: Style::new().yellow(),
    }
  }

  #[must_use]
  pub fn plain() -> Self {
    Self {
      label: Style::new(),
      address: Style::new(),
      value: Style::new(),
      error: Style::new(),
      notice: Style::new(),
    }
  }
}

pub struct Presenter {
  palette: Palette,
}

impl Presenter {
  #[must_use]
  pub const fn new(palette: Palette) -> Self {
    Self { palette }
  }

  /// Writes one record block followed by a blank line.
  ///
  /// # Errors
  ///
  /// Only I/O errors from `out`.
  pub fn write_record<W: Write>(
    &self,
    out: &mut W,
    record: &EnrichmentRecord,
  ) -> io::Result<()> {
    let p = &self.palette;
    writeln!(
      out,
      "{}: {}",
      p.label
        .apply_to(format!("{} Record", record.family.record_type())),
      p.address.apply_to(record.address)
    )?;

    if !record.reverse_names.is_empty() {
      self.field(out, "PTR Records", &record.reverse_names.join(", "))?;
    }

    if let Some(info) = &record.org_info {
      self.field(out, "Country", &info.country)?;
      self.field(out, "Organization", &info.org)?;
    }

    if !record.network_servers.is_empty() {
      self.field(out, "I-Line Servers", &record.network_servers.join(", "))?;
    }

    if let Some(failure) = record.failure() {
      writeln!(
        out,
        "  {}: {}",
        p.error.apply_to("Error"),
        p.error.apply_to(failure)
      )?;
    }

    writeln!(out)
  }

  /// Writes every record in the order given.
  ///
  /// # Errors
  ///
  /// Only I/O errors from `out`.
  pub fn write_all<W: Write>(
    &self,
    out: &mut W,
    records: &[EnrichmentRecord],
  ) -> io::Result<()> {
    for record in records {
      self.write_record(out, record)?;
    }
    Ok(())
  }

  /// Printed instead of a report when the run is interrupted.
  ///
  /// # Errors
  ///
  /// Only I/O errors from `out`.
  pub fn write_cancelled<W: Write>(&self, out: &mut W) -> io::Result<()> {
    writeln!(out, "\nInterrupt received, shutting down...")?;
    writeln!(out, "{}", self.palette.notice.apply_to("Operation cancelled"))
  }

  /// Printed when the family filter leaves nothing to check.
  ///
  /// # Errors
  ///
  /// Only I/O errors from `out`.
  pub fn write_no_match<W: Write>(
    &self,
    out: &mut W,
    target: &str,
  ) -> io::Result<()> {
    writeln!(
      out,
      "{}",
      self.palette.notice.apply_to(format!(
        "No addresses of the requested family found for {target}"
      ))
    )
  }

  fn field<W: Write>(
    &self,
    out: &mut W,
    label: &str,
    value: &str,
  ) -> io::Result<()> {
    writeln!(
      out,
      "  {}: {}",
      self.palette.label.apply_to(label),
      self.palette.value.apply_to(value)
    )
  }
}

/// Writes a fatal error as a single red line.
///
/// # Errors
///
/// Only I/O errors from `out`.
pub fn write_fatal<W: Write>(
  out: &mut W,
  err: &anyhow::Error,
) -> io::Result<()> {
  writeln!(
    out,
    "{}: {}",
    style("Error").red().bold(),
    style(format!("{err:#}")).red()
  )
}

/// Prints a fatal error on stderr.
pub fn print_fatal(err: &anyhow::Error) {
  let _ = write_fatal(&mut io::stderr(), err);
}
