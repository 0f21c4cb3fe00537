// build.rs

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

const FALLBACK_LANG: &str = "en";

fn main() {
    // --- 1. Pick the help-text language ---
    // `lang_*` cargo features win over the `JWX_LANG` environment variable.
    let mut requested: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(|l| l.to_lowercase())
        })
        .collect();
    requested.sort();

    let lang = match requested.first() {
        Some(first) => {
            if requested.len() > 1 {
                println!(
                    "cargo:warning=Several language features enabled ({:?}). Using '{}'.",
                    requested, first
                );
            }
            first.clone()
        }
        None => env::var("JWX_LANG").unwrap_or_else(|_| FALLBACK_LANG.to_string()),
    };

    println!("cargo:rustc-env=JWX_LANG_EFFECTIVE={}", lang);
    println!("cargo:rerun-if-env-changed=JWX_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=locales/");

    // --- 2. English is the base table; every key must exist there ---
    let base_path = format!("locales/{}.toml", FALLBACK_LANG);
    let base_content = fs::read_to_string(&base_path)
        .unwrap_or_else(|_| panic!("Failed to read base language file: {}", base_path));
    let mut translations: BTreeMap<String, String> = toml::from_str(&base_content)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", base_path, e));

    // --- 3. Overlay the selected language ---
    if lang != FALLBACK_LANG {
        let lang_path = format!("locales/{}.toml", lang);
        match fs::read_to_string(&lang_path) {
            Ok(content) => {
                let overlay: BTreeMap<String, String> = toml::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", lang_path, e));
                for (key, value) in overlay {
                    if !translations.contains_key(&key) {
                        println!(
                            "cargo:warning=Key '{}' in {} has no English counterpart and is ignored.",
                            key, lang_path
                        );
                        continue;
                    }
                    translations.insert(key, value);
                }
            }
            Err(_) => println!(
                "cargo:warning=Language file '{}' not found. Falling back to '{}'.",
                lang_path, FALLBACK_LANG
            ),
        }
    }

    // --- 4. Emit the `t!` macro ---
    let mut macro_code = String::from("#[macro_export]\nmacro_rules! t {\n");
    for (key, value) in &translations {
        let escaped_value = value.replace('\\', "\\\\").replace('"', "\\\"");
        macro_code.push_str(&format!(
            "    (\"{}\") => {{ \"{}\" }};\n",
            key, escaped_value
        ));
    }
    // Unknown keys fail the build instead of rendering blanks.
    macro_code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n",
    );
    macro_code.push('}');

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is always set by cargo");
    let dest_path = Path::new(&out_dir).join("translations.rs");
    fs::write(&dest_path, macro_code).expect("Failed to write translations.rs");
}
