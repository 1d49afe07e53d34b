//! The `deps` command: list the templates that use a tag or layout.

use stencil_ir::TemplateName;

use super::{directory_compiler, report_error};
use crate::CompilerConfig;

pub fn print_dependents(root: &str, name: &str) {
    let compiler = directory_compiler(root, CompilerConfig::default());
    if let Err(error) = compiler.generate_all() {
        report_error(&compiler, &error);
        std::process::exit(1);
    }
    for user in compiler.templates_using(&TemplateName::new(name)) {
        println!("{user}");
    }
}
