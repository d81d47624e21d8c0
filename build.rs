//! Retrieves information about the version of the solver from Git and the build
//! environment. This information is then written to a file in the output
//! directory and can be accessed at runtime through the `build` module.

use std::path::Path;
use std::{env, fs};

fn generate_file(filename: &str, contents: &str) {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join(filename);
    fs::write(dest_path, contents).unwrap();
}

fn generate_build_info() {
    let profile = env::var("PROFILE").unwrap_or_else(|_| String::from("unknown"));
    let target = env::var("TARGET").unwrap_or_else(|_| String::from("unknown"));
    generate_file("target", &format!("{target} ({profile})"));
}

fn main() -> shadow_rs::SdResult<()> {
    generate_build_info();
    shadow_rs::new()
}
