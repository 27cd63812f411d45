use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a table in primary-key order, printing one JSON value per row
    Scan {
        #[arg(long, help = "Connection URL (postgres://… or mysql://…)")]
        url: String,

        #[arg(long, help = "Table name, optionally schema-qualified")]
        table: String,

        #[arg(
            long,
            value_delimiter = ',',
            required = true,
            help = "Comma-separated columns to print"
        )]
        columns: Vec<String>,

        #[arg(long, help = "Rows fetched per query")]
        batch_size: Option<i64>,

        #[arg(long, help = "Smallest primary key to include")]
        start: Option<i64>,

        #[arg(long, help = "JSON settings file with batch_size and start")]
        settings: Option<String>,

        #[arg(
            long,
            help = "If specified, writes rows to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Print a table's columns, types and primary key as JSON
    Columns {
        #[arg(long, help = "Connection URL")]
        url: String,

        #[arg(long, help = "Table name, optionally schema-qualified")]
        table: String,
    },
}
