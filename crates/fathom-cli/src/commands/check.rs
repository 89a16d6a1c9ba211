use std::path::Path;

pub fn run(dir: &Path) -> Result<(), String> {
    let (story, _) = super::load_story(dir)?;

    let outcomes: usize = story.scenes().map(|s| s.outcome_count()).sum();
    println!("  All checks passed for '{}'.", story.meta.title);
    println!("  {} scenes, {} outcomes", story.scene_count(), outcomes);

    Ok(())
}
