use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path) -> Result<(), String> {
    let (story, vocabulary) = super::load_story(dir)?;

    println!("  '{}'", story.meta.title);
    println!("  start scene:    {}", story.meta.first_scene);
    println!("  opening action: {}", story.meta.first_action);
    println!(
        "  vocabulary:     {} stop words, {} synonyms",
        vocabulary.stop_word_count(),
        vocabulary.synonym_count()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Scene", "Actions", "Outcomes"]);

    let mut scenes: Vec<_> = story.scenes().collect();
    scenes.sort_by(|a, b| a.key.cmp(&b.key));

    for scene in &scenes {
        table.add_row(vec![
            scene.key.clone(),
            scene.action_count().to_string(),
            scene.outcome_count().to_string(),
        ]);
    }

    println!("{table}");
    println!();

    let outcomes: usize = scenes.iter().map(|s| s.outcome_count()).sum();
    println!("  {} scenes, {} outcomes", story.scene_count(), outcomes);

    Ok(())
}
