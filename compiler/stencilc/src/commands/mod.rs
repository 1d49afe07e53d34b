//! Command handlers for the `stencil` CLI.
//!
//! Each submodule implements one command. Option parsing and error
//! reporting shared by the commands live here.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use stencil_diagnostic::TemplateError;
use stencil_ir::{HtmlConfig, TemplateName};

use crate::reporting::Reporter;
use crate::{CodeResolver, CompilerConfig, DirectoryCodeResolver, TemplateCompiler};

mod check;
mod deps;
mod generate;
mod parse;

pub use check::check_templates;
pub use deps::print_dependents;
pub use generate::generate_templates;
pub use parse::{describe_event, parse_template};

/// Options shared by `generate` and `check`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub output: Option<PathBuf>,
    pub package: Option<String>,
    pub html_tags: Vec<String>,
    pub html_attributes: Vec<String>,
    pub binary_threshold: Option<usize>,
    pub max_literal_len: Option<usize>,
}

impl CliOptions {
    pub fn into_config(self) -> CompilerConfig {
        let mut config = CompilerConfig::default();
        if let Some(output) = self.output {
            config = config.with_output_dir(output);
        }
        if let Some(package) = self.package {
            config = config.with_package_name(package);
        }
        if !self.html_tags.is_empty() {
            config = config.with_html(HtmlConfig::new(self.html_tags, self.html_attributes));
        }
        if let Some(threshold) = self.binary_threshold {
            config = config.with_binary_text_threshold(threshold);
        }
        if let Some(max) = self.max_literal_len {
            config = config.with_max_literal_len(max);
        }
        config
    }
}

/// Parse the options following a command's positional arguments.
pub fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-o" {
            let Some(output) = args.get(i + 1) else {
                return Err("`-o` needs a directory".to_string());
            };
            options.output = Some(PathBuf::from(output));
            i += 2;
            continue;
        }
        if let Some(output) = arg.strip_prefix("--output=") {
            options.output = Some(PathBuf::from(output));
        } else if let Some(package) = arg.strip_prefix("--package=") {
            options.package = Some(package.to_string());
        } else if let Some(tags) = arg.strip_prefix("--html-tags=") {
            options.html_tags = split_list(tags);
        } else if let Some(attributes) = arg.strip_prefix("--html-attributes=") {
            options.html_attributes = split_list(attributes);
        } else if let Some(threshold) = arg.strip_prefix("--binary-threshold=") {
            options.binary_threshold = Some(parse_count(arg, threshold)?);
        } else if let Some(max) = arg.strip_prefix("--max-literal=") {
            options.max_literal_len = Some(parse_count(arg, max)?);
        } else {
            return Err(format!("unknown option '{arg}'"));
        }
        i += 1;
    }
    Ok(options)
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_count(arg: &str, value: &str) -> Result<usize, String> {
    value
        .parse()
        .map_err(|_| format!("'{arg}' expects a non-negative number"))
}

/// Compiler over the templates below `root`.
fn directory_compiler(root: &str, config: CompilerConfig) -> TemplateCompiler {
    TemplateCompiler::new(Arc::new(DirectoryCodeResolver::new(root)), config)
}

/// Print `error` to stderr with snippets from the compiler's templates.
fn report_error(compiler: &TemplateCompiler, error: &TemplateError) {
    let resolver = compiler.resolver().as_ref();
    let lookup = |name: &TemplateName| CodeResolver::resolve(resolver, name).ok().flatten();
    let color = std::io::stderr().is_terminal();
    let mut stderr = std::io::stderr().lock();
    if let Err(io_error) = Reporter::new(&lookup)
        .with_color(color)
        .write(error, &mut stderr)
    {
        eprintln!("error: {error} (while reporting: {io_error})");
    }
}

#[cfg(test)]
mod tests;
