//! `scaffold` CLI: ensure a project skeleton exists.
//!
//! With no arguments the built-in layout is applied to the current
//! directory. Existing files and directories are left untouched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use scaffold::exit_codes;
use scaffold::io::fs::LocalFs;
use scaffold::io::manifest::{resolve_manifest, write_manifest};
use scaffold::io::sink::TracingSink;
use scaffold::logging;
use scaffold::scaffold::{Scaffolder, plan_structure};
use tracing::{debug, error, info};

#[derive(Parser)]
#[command(
    name = "scaffold",
    version,
    about = "Create a project's directory and placeholder-file skeleton"
)]
struct Cli {
    /// Project root the entries are relative to.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// TOML manifest with an `entries` list (defaults to the built-in layout).
    #[arg(long, global = true)]
    manifest: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create every missing directory and empty file (default).
    Apply,
    /// Show what `apply` would do without touching the filesystem.
    Plan,
    /// Print each entry with its file/dir classification.
    List,
    /// Write the active layout to a TOML manifest.
    Export {
        path: PathBuf,
        /// Overwrite an existing manifest.
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            error!("{err:#}");
            exit_codes::FAILURE
        }
    };
    std::process::exit(code);
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Apply) {
        Command::Apply => cmd_apply(&cli.root, cli.manifest.as_deref())
            .context("Error creating project structure"),
        Command::Plan => cmd_plan(&cli.root, cli.manifest.as_deref()),
        Command::List => cmd_list(cli.manifest.as_deref()),
        Command::Export { path, force } => cmd_export(cli.manifest.as_deref(), &path, force),
    }
}

fn cmd_apply(root: &Path, manifest: Option<&Path>) -> Result<()> {
    let manifest = resolve_manifest(manifest)?;
    ensure_root(root)?;
    let local = LocalFs::new(root);
    debug!(root = %local.root().display(), entries = manifest.entries.len(), "applying scaffold");

    let mut scaffolder = Scaffolder::new(local, TracingSink);
    let summary = scaffolder.ensure_structure(&manifest.entries)?;
    info!(
        dirs_created = summary.dirs_created,
        dirs_existing = summary.dirs_existing,
        files_created = summary.files_created,
        files_existing = summary.files_existing,
        "scaffold summary"
    );
    info!("Project structure creation completed successfully!");
    Ok(())
}

fn cmd_plan(root: &Path, manifest: Option<&Path>) -> Result<()> {
    let manifest = resolve_manifest(manifest)?;
    ensure_root(root)?;
    let actions =
        plan_structure(&LocalFs::new(root), &manifest.entries).context("plan scaffold")?;
    for action in &actions {
        println!("{:<11} {}", action.plan_label(), action.path().display());
    }
    Ok(())
}

fn cmd_list(manifest: Option<&Path>) -> Result<()> {
    let manifest = resolve_manifest(manifest)?;
    for entry in &manifest.entries {
        println!("{}\t{}", entry.kind().label(), entry);
    }
    Ok(())
}

fn cmd_export(manifest: Option<&Path>, path: &Path, force: bool) -> Result<()> {
    let manifest = resolve_manifest(manifest)?;
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    write_manifest(path, &manifest)
        .with_context(|| format!("export manifest {}", path.display()))?;
    info!(path = %path.display(), "manifest written");
    Ok(())
}

fn ensure_root(root: &Path) -> Result<()> {
    let meta = fs::metadata(root).with_context(|| format!("project root {}", root.display()))?;
    if !meta.is_dir() {
        bail!("project root {} is not a directory", root.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_without_subcommand_defaults_to_apply() {
        let cli = Cli::parse_from(["scaffold"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
        assert!(cli.manifest.is_none());
    }

    #[test]
    fn parse_global_options_after_subcommand() {
        let cli = Cli::parse_from(["scaffold", "plan", "--root", "out", "--manifest", "m.toml"]);
        assert!(matches!(cli.command, Some(Command::Plan)));
        assert_eq!(cli.root, PathBuf::from("out"));
        assert_eq!(cli.manifest, Some(PathBuf::from("m.toml")));
    }

    #[test]
    fn parse_export_force() {
        let cli = Cli::parse_from(["scaffold", "export", "layout.toml", "--force"]);
        match cli.command {
            Some(Command::Export { path, force }) => {
                assert_eq!(path, PathBuf::from("layout.toml"));
                assert!(force);
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn ensure_root_rejects_files() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("not-a-dir.txt");
        fs::write(&file, "").expect("write");
        let err = ensure_root(&file).expect_err("should reject");
        assert!(err.to_string().contains("is not a directory"));
    }
}
