//! The `check` command: generate in memory and report problems.

use super::{directory_compiler, report_error, CliOptions};

/// Generate every template below `root` without writing anything.
pub fn check_templates(root: &str, options: CliOptions) {
    let compiler = directory_compiler(root, options.into_config());
    let batch = match compiler.generate_all() {
        Ok(batch) => batch,
        Err(error) => {
            report_error(&compiler, &error);
            std::process::exit(1);
        }
    };
    if let Err(error) = batch.target() {
        report_error(&compiler, &error);
        std::process::exit(1);
    }
    println!("OK: {root} ({} unit(s))", batch.len());
}
