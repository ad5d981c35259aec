use std::path::Path;
use std::sync::Arc;

use crate::cli::handlers::load_artifact;
use crate::cli::output::{
    output_json, print_header, print_kv, print_report, print_success, print_table, OutputMode,
};
use crate::cli::progress::BarReporter;
use crate::config::ShotlistConfig;
use crate::models::{HeroArtifact, Screenplay, StoryFormat};
use crate::services::ShotPlanner;
use crate::utils::sanitize::slugify_project_id;

pub struct PlanArgs<'a> {
    pub screenplay: &'a Path,
    pub hero: Option<&'a Path>,
    pub format: Option<&'a str>,
    pub project: Option<&'a str>,
    pub output_dir: Option<&'a Path>,
    pub dry_run: bool,
}

pub fn handle_plan(
    mut config: ShotlistConfig,
    args: PlanArgs<'_>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let screenplay: Screenplay = load_artifact(args.screenplay)?;
    let hero = args.hero.map(load_artifact::<HeroArtifact>).transpose()?;

    let format = match args.format {
        Some(f) => StoryFormat::parse(f).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown format '{}'. Use feature_film, short_film, series_episode or short_form",
                f
            )
        })?,
        None => config.default_format,
    };
    let project_id = args
        .project
        .map(String::from)
        .unwrap_or_else(|| slugify_project_id(&screenplay.title));
    if let Some(dir) = args.output_dir {
        config.output_dir = dir.to_path_buf();
    }

    let mut planner = ShotPlanner::new(config);
    if args.dry_run {
        planner = planner.without_persistence();
    }
    let bar = (mode == OutputMode::Human).then(|| Arc::new(BarReporter::new()));
    if let Some(bar) = &bar {
        planner = planner.with_progress(bar.clone());
    }

    let outcome = planner.run(&screenplay, hero.as_ref(), format, &project_id);
    if let Some(bar) = &bar {
        bar.finish();
    }

    if !outcome.success {
        anyhow::bail!("Planning failed: {}", outcome.message);
    }

    let summary = outcome.shot_list.summary();
    match mode {
        OutputMode::Json => {
            output_json(&serde_json::json!({
                "success": outcome.success,
                "message": outcome.message,
                "project_id": project_id,
                "output_path": outcome.output_path,
                "summary": summary,
                "report": outcome.report,
            }));
        }
        OutputMode::Human => {
            print_success(&outcome.message);
            print_kv("Project", &project_id);
            print_kv("Format", &format!("{} ({})", format, format.aspect_ratio()));
            match &outcome.output_path {
                Some(path) => print_kv("Written", &path.display().to_string()),
                None => print_kv("Written", "no (dry run)"),
            }
            print_kv("Disaster moments", &summary.disaster_moments.to_string());

            print_header("Shot types");
            print_table(
                &["Shot Type", "Count"],
                summary
                    .by_shot_type
                    .iter()
                    .map(|(k, v)| vec![k.clone(), v.to_string()])
                    .collect(),
            );
            print_header("Transitions");
            print_table(
                &["Transition", "Count"],
                summary
                    .by_transition
                    .iter()
                    .map(|(k, v)| vec![k.clone(), v.to_string()])
                    .collect(),
            );

            if let Some(report) = &outcome.report {
                print_header("Validation");
                print_report(report);
            }
        }
    }

    Ok(())
}
