use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mdnotes",
    version,
    about = "Serve a directory of front-matter Markdown notes as HTML"
)]
pub struct Cli {
    /// Directory holding the `.md` documents
    #[arg(long, env = "MDNOTES_DOCS_DIR", default_value = "docs")]
    pub docs_dir: PathBuf,

    /// Directory containing the `images/` and `css/` folders
    #[arg(long, env = "MDNOTES_STATIC_DIR", default_value = ".")]
    pub static_dir: PathBuf,

    #[arg(long, env = "MDNOTES_BIND", default_value = "0.0.0.0:3000")]
    pub bind: String,
}
