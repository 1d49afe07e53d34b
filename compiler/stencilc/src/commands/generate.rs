//! The `generate` command: precompile every template below a root.

use super::{directory_compiler, report_error, CliOptions};

pub fn generate_templates(root: &str, options: CliOptions) {
    let config = options.into_config();
    let output_dir = config.output_dir.clone();
    let compiler = directory_compiler(root, config);
    match compiler.precompile_all() {
        Ok(batch) => {
            println!(
                "Generated {} unit(s) from {root} into {}",
                batch.len(),
                output_dir.display()
            );
        }
        Err(error) => {
            report_error(&compiler, &error);
            std::process::exit(1);
        }
    }
}
