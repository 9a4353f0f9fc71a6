/// Constants used by the sampling policy and output naming.
pub mod sampling {
    /// Deterministic RNG seed used for every sampling draw.
    pub const DEFAULT_SEED: u64 = 42;
    /// Lower bound on the sample size before clamping to the source row count.
    pub const MIN_SAMPLE_ROWS: usize = 1000;
    /// Divisor for the proportional part of the sample size (10 keeps roughly 10%).
    pub const SAMPLE_DIVISOR: usize = 10;
    /// Suffix inserted before the extension when naming sample output files.
    pub const SAMPLE_SUFFIX: &str = "_sample";
}

/// Fixed file names from the upstream Chuncheon dataset layout.
pub mod inputs {
    /// Drainage-grade records for the Chuncheon study area.
    pub const DRAINAGE_GRADES: &str = "배수등급_춘천.csv";
    /// Joined geodata table.
    pub const JOINED_GEODATA: &str = "joined_gdf.csv";
    /// Building population table.
    pub const BUILDING_POPULATION: &str = "build_pop_df_0901.csv";
    /// Default sampling inputs, processed in this order.
    pub const DEFAULT_SAMPLE_INPUTS: [&str; 3] =
        [DRAINAGE_GRADES, JOINED_GEODATA, BUILDING_POPULATION];

    /// First-listed duplicate totals candidate; wins byte-size ties.
    pub const TOTALS_PRIMARY: &str = "df_total_0910.csv";
    /// Second duplicate totals candidate.
    pub const TOTALS_SECONDARY: &str = "df_total_0910_.csv";
    /// Canonical name the surviving totals candidate is renamed to.
    pub const TOTALS_CANONICAL: &str = "df_total_main.csv";
}

/// Constants used by report formatting.
pub mod report {
    /// Bytes per binary megabyte, the unit used for reported file sizes.
    pub const BYTES_PER_MEBIBYTE: u64 = 1024 * 1024;
}
