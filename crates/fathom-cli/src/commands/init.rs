use std::fs;
use std::path::Path;

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{}' already exists", name));
    }

    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;

    let story_content = format!(
        r#"-- Story metadata and input vocabulary
story "{name}" {{
    start first_scene
    stop words [a, an, the, at, to]
    synonym grab means get
}}

scene first_scene {{
    on "_arrive" {{
        outcome {{
            """
            Your story starts here. Add scenes below and connect them
            with `move to` mutators.
            """
        }}
    }}

    on "look" {{
        outcome {{
            text "Nothing but possibility."
        }}
    }}

    on "_no_match" {{
        outcome {{
            text "Nothing happens."
        }}
    }}
}}
"#
    );

    fs::write(dir.join("main.story"), story_content)
        .map_err(|e| format!("cannot write main.story: {e}"))?;

    println!("Created story '{}' in {}/", name, name);
    println!("  main.story  — story metadata and opening scene");
    println!();
    println!("Get started:");
    println!("  cd {}", name);
    println!("  # Edit main.story to write your story");
    println!("  fathom check   # Compile and report problems");
    println!("  fathom info    # Summarize scenes and actions");
    println!("  fathom play    # Play it");

    Ok(())
}
