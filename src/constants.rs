pub const ID_COLUMN: &str = "id";
pub const DEFAULT_KEY_COLUMN: &str = "address";

pub const DEFAULT_BASE_DIRECTORY: &str = "cache";
pub const POOLS_CACHE_FILE: &str = ".cached-pools.csv";
pub const TOKENS_CACHE_FILE: &str = ".cached-tokens.csv";

pub const DEFAULT_BATCH_SIZE: usize = 50_000;
pub const MIN_BATCH_SIZE: usize = 1;
pub const MAX_BATCH_SIZE: usize = 5_000_000;

pub const TEMP_FILE_PREFIX: &str = ".";
pub const TEMP_FILE_SUFFIX: &str = ".tmp";
pub const SCRATCH_STORE_PREFIX: &str = "cache-sift-";
pub const SCRATCH_STORE_SUFFIX: &str = ".sqlite3";
pub const SCRATCH_TABLE_NAME: &str = "t";
pub const SCRATCH_INDEX_NAME: &str = "uniq";

pub const PROGRESS_REPORT_INTERVAL_RECORDS: usize = 100_000;

pub const DEFAULT_MAX_RAM_USAGE_PERCENT: u8 = 50;
pub const MAX_RAM_USAGE_PERCENT: u8 = 90;

pub const BYTES_PER_KB: usize = 1024;
pub const PERCENT_100: f64 = 100.0;

pub const EXIT_CODE_SUCCESS: u8 = 0;
pub const EXIT_CODE_FILE_FAILED: u8 = 1;
pub const EXIT_CODE_SETUP_FAILED: u8 = 2;
