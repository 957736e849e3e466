use anyhow::Result;
use owo_colors::OwoColorize;
use talkgrid_core::planner::{Confirm, Outcome, Planner};

use crate::render::{print_save_error, title_of, warning};

pub fn run(planner: &mut Planner, slot: &str, talk: &str, confirm: &mut dyn Confirm) -> Result<()> {
    let outcome = match planner.select(slot, talk, confirm) {
        Ok(outcome) => outcome,
        Err(e) if e.is_conflict() => {
            println!("{}", warning(e));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let Outcome::Applied { change, save_error } = outcome else {
        println!("{}", "Nothing changed".dimmed());
        return Ok(());
    };

    let catalog = planner.catalog();
    println!(
        "{} {} at {}",
        "✓".green(),
        title_of(catalog, &change.slot, &change.talk_id).bold(),
        change.slot
    );

    if let Some(replaced) = &change.replaced {
        println!("  {} {}", "replaced".dimmed(), title_of(catalog, &change.slot, replaced));
    }
    if let Some(hidden) = &change.hidden {
        for discarded in &change.discarded {
            println!("  {} {} at {}", "removed".red(), title_of(catalog, hidden, discarded), hidden);
        }
        println!("  {}", format!("the workshop also takes {hidden}").dimmed());
    }
    for released in &change.released {
        println!("  {}", format!("{released} is free again").dimmed());
    }

    print_save_error(save_error.as_ref());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use talkgrid_core::Catalog;
    use talkgrid_core::planner::AssumeYes;
    use talkgrid_core::store::Store;

    const CATALOG: &str = r#"{
        "10:00": [ { "title": "Docker para Iniciantes", "track": "Workshop", "cardImage": "d.png", "isWorkshop": true } ],
        "10:50": [ { "title": "Generative UI", "track": "Avançado", "cardImage": "g.png" } ]
    }"#;

    #[test]
    fn conflicts_warn_without_failing() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let (mut planner, _) = Planner::open(catalog, Store::new(dir.path()));

        run(&mut planner, "10:00", "docker", &mut AssumeYes).unwrap();
        run(&mut planner, "10:50", "1", &mut AssumeYes).unwrap();

        assert_eq!(planner.selection().len(), 1);
        assert!(run(&mut planner, "10:50", "nope", &mut AssumeYes).is_err());
    }
}
