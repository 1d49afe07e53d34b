//! Compiles `templates/` into `$OUT_DIR/stencil_templates.rs`.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use stencil_codegen::HtmlHook;
use stencil_ir::{HtmlAttribute, HtmlConfig};
use stencil_runtime::TemplateOutput;
use stencilc::{CompilerConfig, DirectoryCodeResolver, TemplateCompiler};

/// Text runs longer than this land in a `.bin` payload.
const BINARY_THRESHOLD: usize = 200;

/// Prefixes form actions and appends a hidden token field to every form.
struct FormHook;

impl HtmlHook for FormHook {
    fn on_attribute_started(
        &self,
        _tag: &str,
        name: &str,
        _attributes: &[HtmlAttribute],
        output: &mut dyn TemplateOutput,
    ) {
        if name == "action" {
            output.write_raw("/app");
        }
    }

    fn on_tag_closed(&self, _name: &str, output: &mut dyn TemplateOutput) {
        output.write_raw("<input type=\"hidden\" name=\"csrf\" value=\"e2e\">");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let manifest_dir = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR")?);
    let templates = manifest_dir.join("templates");
    println!("cargo:rerun-if-changed={}", templates.display());

    let config = CompilerConfig::default()
        .with_output_dir(std::env::var("OUT_DIR")?)
        .with_binary_text_threshold(BINARY_THRESHOLD)
        .with_html(HtmlConfig::new(["form"], ["action"]))
        .with_html_hook(Arc::new(FormHook));
    let compiler = TemplateCompiler::new(Arc::new(DirectoryCodeResolver::new(templates)), config);
    compiler.precompile_all()?;
    Ok(())
}
