//! # Simple Site
//!
//! A minimal static site generator. A manifest lists the pages, templates
//! render them, and the result is a directory of plain HTML any static file
//! server can host.
//!
//! # Input Layout
//!
//! ```text
//! site/
//! ├── config.json        # Manifest: [{ "url", "template", "context" }, ...]
//! ├── templates/         # Tera templates, referenced by name from the manifest
//! │   ├── base.html
//! │   └── index.html
//! └── static/            # Optional, copied verbatim into the output root
//!     └── css/style.css
//! ```
//!
//! Each page lands at `<output>/<url>/index.html`, so `/about/` becomes
//! `about/index.html` and links never need a `.html` suffix.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`manifest`] | Loads and validates `config.json` / `config.toml` into page descriptors |
//! | [`template`] | Loads the template root into Tera and renders pages, auto-escaping HTML/XML |
//! | [`paths`] | Maps page URLs to `index.html` files under the output root |
//! | [`assets`] | Mirrors the `static/` tree into the output root byte for byte |
//! | [`generate`] | Orchestrates a build: destination check, manifest, render loop, static copy |
//! | [`config`] | Build options and the fixed input/output layout |
//! | [`types`] | Types shared between stages (`PageDescriptor`, `BuildEvent`) |
//! | [`output`] | CLI output formatting for verbose progress |
//!
//! # Design Decisions
//!
//! ## All or Nothing
//!
//! Every error is fatal. A page with a missing template or a broken render
//! stops the build instead of being skipped: static sites are deployed as a
//! whole, and a site with holes in it is worse than a clear failure. The
//! output directory must not exist beforehand, and nothing is written until
//! the manifest has been fully validated.
//!
//! ## Runtime Templates
//!
//! Pages are rendered with [Tera](https://keats.github.io/tera/) from files
//! on disk, so a site can be rebuilt with new markup without recompiling.
//! Context values are arbitrary JSON and templates can reach into nested
//! fields. Anything rendered into an `.html` or `.xml` template is escaped.
//! A template is only checked when a page renders it, so a broken draft in
//! `templates/` that no page uses does not stop the build.
//!
//! ## Sequential Builds
//!
//! Pages are rendered and written one at a time in manifest order, and
//! static files are copied after the last page. No page reads another
//! page's output, so the result does not depend on manifest order.

pub mod assets;
pub mod config;
pub mod generate;
pub mod manifest;
pub mod output;
pub mod paths;
pub mod template;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
