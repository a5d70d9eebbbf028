use std::path::Path;

/// The fallback is meant to be a handful of entries, not a second catalog
const MAX_FALLBACK_ENTRIES: usize = 5;

fn main() {
    let catalog_path = Path::new("catalogs/fallback.json");
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         The built-in fallback catalog is compiled into the binary.\n",
        catalog_path.display()
    );

    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let items = catalog.get("items").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'items' field\n\
             The catalog must have a top-level 'items' array.\n"
        );
    });

    let entries = items.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'items' must be an array\n\
             Got: {items}\n"
        );
    });

    assert!(
        !entries.is_empty(),
        "\n\nCATALOG BUILD ERROR: 'items' is empty\n\
         The fallback catalog must hold at least one entry.\n"
    );
    assert!(
        entries.len() <= MAX_FALLBACK_ENTRIES,
        "\n\nCATALOG BUILD ERROR: {} entries in the fallback catalog\n\
         Keep it to at most {MAX_FALLBACK_ENTRIES} entries.\n",
        entries.len()
    );

    let total_aliases = validate_entries(entries);

    println!(
        "cargo:warning=Validated fallback catalog: {} entries, {total_aliases} aliases",
        entries.len()
    );
}

fn validate_entries(entries: &[serde_json::Value]) -> usize {
    let mut total_aliases = 0;

    for (i, entry) in entries.iter().enumerate() {
        let name = entry
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .unwrap_or_default();

        assert!(
            !name.is_empty(),
            "\n\nCATALOG BUILD ERROR: Entry at index {i} has no 'name'\n\
             Every entry needs a non-empty name.\n"
        );
        assert!(
            entry.get("status").and_then(|v| v.as_str()).is_some(),
            "\n\nCATALOG BUILD ERROR: Entry '{name}' (index {i}) missing 'status' field\n"
        );

        if let Some(aliases) = entry.get("aliases") {
            let aliases = aliases.as_array().unwrap_or_else(|| {
                panic!(
                    "\n\nCATALOG BUILD ERROR: Entry '{name}' (index {i}) 'aliases' must be an array\n"
                );
            });
            assert!(
                aliases.iter().all(serde_json::Value::is_string),
                "\n\nCATALOG BUILD ERROR: Entry '{name}' (index {i}) has a non-string alias\n"
            );
            total_aliases += aliases.len();
        }
    }

    total_aliases
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the fallback catalog changes
    println!("cargo:rerun-if-changed=catalogs/fallback.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
