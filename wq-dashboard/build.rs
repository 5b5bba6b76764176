use std::env;
use std::fs;
use std::path::Path;

/// Header-only fallbacks so the app still builds without fixtures; loading
/// then fails with a visible error instead of a compile error.
const OBSERVATIONS_HEADER: &str = "site_name,parameter,value,unit,date_time\n";
const SITES_HEADER: &str = "site_name,latitude,longitude,aquatic_life_use\n";

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    for (file, fallback) in [
        ("observations.csv", OBSERVATIONS_HEADER),
        ("sites.csv", SITES_HEADER),
    ] {
        let src = Path::new("../fixtures").join(file);
        let dest = Path::new(&out_dir).join(file);
        if src.exists() {
            fs::copy(&src, &dest).unwrap();
        } else {
            fs::write(&dest, fallback).unwrap();
        }
        println!("cargo:rerun-if-changed=../fixtures/{}", file);
    }

    println!("cargo:rerun-if-changed=build.rs");
}
