use std::path::Path;
use std::process::Command;

/// Run `gofmt -w` on a generated file.
///
/// The generator already emits gofmt-clean source; this is for projects that
/// want the formatter as the final word. `FSROUTER_GOFMT_BIN` overrides the
/// binary.
pub fn format_output(path: &Path) -> anyhow::Result<()> {
    let gofmt_bin = std::env::var("FSROUTER_GOFMT_BIN").unwrap_or_else(|_| "gofmt".to_string());

    let status = Command::new(&gofmt_bin).arg("-w").arg(path).status()?;
    if !status.success() {
        anyhow::bail!("{gofmt_bin} failed on {}", path.display());
    }
    Ok(())
}
