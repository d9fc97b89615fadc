/// 關卡載入
///
/// 把潛行關卡檔轉成障礙物表與代理人表
pub mod stealth_level;

pub use stealth_level::{FloorData, LevelAgent, LevelData, WorldSize};
