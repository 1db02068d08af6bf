mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rota_types::AnalysisRequest;

#[derive(Parser)]
#[command(version, about = "FFLogs rotation analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the canonical rotation table for one player in one fight.
    Analyze {
        /// Report code from the log site URL.
        #[arg(short, long)]
        report: String,

        /// Fight id within the report.
        #[arg(short, long)]
        fight: u32,

        /// Actor id of the player to analyze.
        #[arg(short, long)]
        player: u32,

        /// Job name, e.g. "DarkKnight".
        #[arg(short, long)]
        job: String,

        /// Phase to analyze; 0 means the whole fight.
        #[arg(long, default_value_t = 0)]
        phase: u8,

        /// Encounter id, required when a phase is selected.
        #[arg(long)]
        encounter: Option<u32>,

        /// Actor ids of the player's pets.
        #[arg(long, value_delimiter = ',')]
        pets: Vec<u32>,

        /// Enemy game ids to exclude from aggregation.
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<u32>,

        /// Critical hit stat.
        #[arg(long, default_value_t = 420)]
        crit: u32,

        /// Direct hit stat.
        #[arg(long, default_value_t = 420)]
        dh: u32,

        /// Determination stat.
        #[arg(long, default_value_t = 440)]
        det: u32,

        /// Character level.
        #[arg(long, default_value_t = 100)]
        level: u8,
    },
    /// Store the API token used for log queries.
    SetToken {
        token: String,

        /// Override the API endpoint.
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            report,
            fight,
            player,
            job,
            phase,
            encounter,
            pets,
            exclude,
            crit,
            dh,
            det,
            level,
        } => {
            let request = AnalysisRequest {
                report_id: report,
                fight_id: fight,
                phase,
                encounter_id: encounter,
                player_id: player,
                pet_ids: pets,
                job,
                excluded_enemy_ids: exclude,
                build: commands::build_args(crit, dh, det, level),
            };
            commands::analyze(request).await
        }
        Commands::SetToken { token, url } => commands::set_token(&token, url.as_deref()),
    }
}
