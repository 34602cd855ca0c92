pub mod error;
pub mod files;
pub mod records;
pub mod remote;

pub use error::{PersistError, RemoteSaveError};
pub use files::{
    atomic_write, data_file, ensure_timebar_dir, get_timebar_dir, init_local_timebar, read_file,
    report_file, snapshot_file_name, today_data_file,
};
pub use records::{load_markers, save_markers, write_snapshot, MarkerRecord};
pub use remote::{
    spawn_daily_summary, spawn_save, spawn_weekly_report, RemoteClient, RemoteEvent,
    SummarySection,
};
