use crate::infra::load_directory;
use clap::Args;
use facility_intel::config::{AppConfig, DataConfig};
use facility_intel::directory::{
    grade_legend, grade_of, CityResolutionOutcome, CityView, DirectoryOverview,
    DirectoryServiceError, EnhancedFacility, RankingLayout,
};
use facility_intel::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DataArgs {
    /// Facility CSV export (overrides FACILITIES_CSV)
    #[arg(long)]
    pub(crate) facilities: Option<PathBuf>,
    /// Intelligence JSON snapshot (overrides INTELLIGENCE_JSON)
    #[arg(long)]
    pub(crate) intelligence: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct CityReportArgs {
    /// City name or slug, any casing (e.g. "san antonio" or san-antonio)
    pub(crate) city: String,
    #[command(flatten)]
    pub(crate) data: DataArgs,
}

impl DataArgs {
    pub(crate) fn apply(self, config: &mut DataConfig) {
        if let Some(path) = self.facilities {
            config.facilities_path = path;
        }
        if let Some(path) = self.intelligence {
            config.intelligence_path = path;
        }
    }
}

fn data_config(args: DataArgs) -> Result<DataConfig, AppError> {
    let mut config = AppConfig::load()?.data;
    args.apply(&mut config);
    Ok(config)
}

pub(crate) fn run_city_index(args: DataArgs) -> Result<(), AppError> {
    let directory = load_directory(&data_config(args)?)?;
    let overview = directory.overview()?;
    render_overview(&overview);
    Ok(())
}

pub(crate) fn run_city_report(args: CityReportArgs) -> Result<(), AppError> {
    let CityReportArgs { city, data } = args;
    let directory = load_directory(&data_config(data)?)?;

    let view = match directory.city(&city)? {
        CityResolutionOutcome::Found(view) => view,
        CityResolutionOutcome::Redirect { slug } => match directory.city(&slug)? {
            CityResolutionOutcome::Found(view) => view,
            CityResolutionOutcome::Redirect { .. } => {
                return Err(DirectoryServiceError::CityNotFound(city).into())
            }
        },
    };

    render_city(&view);
    Ok(())
}

fn render_overview(overview: &DirectoryOverview) {
    let statewide = &overview.statewide;
    println!("Statewide overview");
    println!(
        "- {} facilities tracked across {} cities",
        statewide.total_facilities, statewide.total_cities
    );
    match statewide.avg_safety_score {
        Some(score) => println!("- Average safety score {score}"),
        None => println!("- Average safety score unavailable"),
    }
    println!("- {} total violations", statewide.total_violations);

    println!("\nGrade scale");
    for band in grade_legend() {
        println!(
            "  {} {:<12} {:>6}  ({})",
            band.grade.letter(),
            band.label,
            band.range,
            band.tone.label()
        );
    }

    for letter in overview.index.letters() {
        let cities = overview.index.cities_under(letter);
        println!("\n{letter} ({} cities)", cities.len());
        for city in cities {
            println!(
                "  - {} [/{}]: {} facilities | avg score {} | {:.1} violations",
                city.name, city.slug, city.total_facilities, city.avg_safety_score, city.avg_violations
            );
        }
    }
}

fn render_city(view: &CityView) {
    let stats = &view.stats;
    println!("{} ({})", stats.name, stats.slug);
    println!(
        "- {} facilities | avg safety score {} | {:.1} violations per facility",
        stats.total_facilities, stats.avg_safety_score, stats.avg_violations
    );
    println!("- {}", view.outlook_headline);
    if let Some(benchmark) = &view.benchmark {
        println!(
            "- Regional benchmark: {:.1} violations across {} facilities",
            benchmark.avg_violations, benchmark.facility_count
        );
    }

    match &view.rankings {
        RankingLayout::Unified { facilities } => {
            println!("\nAll facilities");
            render_facilities(facilities);
        }
        RankingLayout::Split(panels) => {
            println!("\n{} ({})", panels.title, panels.subtitle);
            render_facilities(&panels.top);
            println!("\n{} ({})", panels.watch_title, panels.watch_subtitle);
            render_facilities(&panels.worst);
        }
    }
}

fn render_facilities(facilities: &[EnhancedFacility]) {
    for facility in facilities {
        let assessment = grade_of(facility.safety_score());
        println!(
            "  - {} [{}]: score {} ({} {}) | {} violations",
            facility.name(),
            facility.id(),
            assessment.score,
            assessment.grade.letter(),
            assessment.grade_label,
            facility.violation_count()
        );
    }
}
