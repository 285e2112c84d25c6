use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `<count> <word>`
    #[default]
    Text,
    /// `<word>\t<count>`
    Tsv,
    /// `[{"word": .., "count": ..}]`
    Json,
}

/// バケットが満杯のときの動作
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// エラーで終了
    #[default]
    Fatal,
    /// 次のバケットを探索
    LinearProbing,
}
