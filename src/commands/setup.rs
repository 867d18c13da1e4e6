use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Result, bail};

use crate::cli::{GlobalOpts, SetupOpts};
use crate::exec::SystemExecutor;
use crate::lifecycle::{Context, Runtime};
use crate::logging::{Log, Logger};

/// Environment variable naming the package root.
pub const ROOT_ENV: &str = "COMMITKIT_ROOT";

/// Run the setup command.
///
/// # Errors
///
/// Returns an error if configuration loading, root resolution, or any
/// lifecycle phase fails.
pub fn run(global: &GlobalOpts, opts: &SetupOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("commitkit {}", super::version()));

    log.stage("Loading configuration");
    let config = super::load_config(global, log)?;

    let package_root = resolve_package_root(opts)?;
    let project_root = match &opts.project_root {
        Some(root) => root.clone(),
        None => std::env::current_dir()?,
    };
    log.info(&format!("package root: {}", package_root.display()));
    log.info(&format!("project root: {}", project_root.display()));

    let ctx = Context::new(
        config,
        package_root,
        project_root,
        Arc::clone(log) as Arc<dyn Log>,
        Arc::new(SystemExecutor),
    )?
    .with_dry_run(global.dry_run);

    let result = Runtime::new(ctx).run();
    log.print_summary();
    result
}

/// Resolve the package root directory.
///
/// Checks, in order: `--package-root`, `$COMMITKIT_ROOT`, and directories
/// near the running binary that contain `templates/`.
///
/// # Errors
///
/// Returns an error if none of them names a package root.
pub fn resolve_package_root(opts: &SetupOpts) -> Result<PathBuf> {
    let exe = std::env::current_exe().ok();
    resolve_package_root_from(
        opts.package_root.as_deref(),
        std::env::var_os(ROOT_ENV),
        exe.as_deref(),
    )
}

fn resolve_package_root_from(
    flag: Option<&Path>,
    env: Option<OsString>,
    exe: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(root) = flag {
        return Ok(root.to_path_buf());
    }
    if let Some(root) = env.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }

    // bin/ → package, target/release/ → crate root
    let found = exe.and_then(Path::parent).and_then(|parent| {
        [parent.to_path_buf(), parent.join(".."), parent.join("../..")]
            .into_iter()
            .find(|candidate| candidate.join("templates").is_dir())
    });
    match found {
        Some(root) => Ok(dunce::canonicalize(&root).unwrap_or(root)),
        None => bail!("templates not found; pass --package-root or set {ROOT_ENV}"),
    }
}
