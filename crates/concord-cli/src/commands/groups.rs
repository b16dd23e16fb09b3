use crate::support::{load_config_or_exit, print_json_or_exit};
use concord_kernel::{JsonsGroup, JsonsGroupSpec};
use serde_json::json;

pub fn run(config: String, json_output: bool) {
    let config = load_config_or_exit(&config);

    if json_output {
        let groups: Vec<JsonsGroupSpec> =
            config.groups().iter().map(JsonsGroup::to_spec).collect();
        let payload = json!({
            "config": config.path().display().to_string(),
            "groupCount": groups.len(),
            "groups": groups,
        });
        print_json_or_exit(&payload, "groups");
    } else {
        println!("concord groups");
        println!("  Config: {}", config.path().display());
        for group in config.groups() {
            print_group(&group.to_spec());
        }
    }
}

fn print_group(spec: &JsonsGroupSpec) {
    println!("  Group \"{}\":", spec.name);
    println!("    Include: {}", spec.include_paths.join(", "));
    println!("    Exclude: {}", spec.exclude_paths.join(", "));
    for member in &spec.members {
        let depth = member.level_keys.depth();
        let path: Vec<String> = member
            .level_keys
            .levels()
            .map(|(_, keys)| keys.join("|"))
            .collect();
        println!(
            "    - {} ({depth} level{}: {}, {}, expected {})",
            member.filename,
            if depth == 1 { "" } else { "s" },
            path.join(" > "),
            member.check_type,
            member.expected_occurrence
        );
    }
}
