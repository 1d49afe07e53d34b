//! Render functions generated from `templates/` by the build script.
//!
//! Every template becomes a module below [`stencil::generated`], e.g.
//! `templates/tag/card.stn` is `stencil::generated::tag::StncardGenerated`.

include!(concat!(env!("OUT_DIR"), "/stencil_templates.rs"));
