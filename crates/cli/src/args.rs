// crates/cli/src/args.rs
use crate::options::{CollisionPolicy, OutputFormat};
use crate::parsers::{self, SizeArg};
use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "wordfreq",
    version,
    about = "固定容量ハッシュテーブルによる単語頻度集計ツール",
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub table: TableOptions,

    #[command(flatten)]
    pub output: OutputOptions,

    /// ログを詳細にする (-v: info, -vv: debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// 入力ファイル (`-` は標準入力)
    #[arg(value_hint = ValueHint::FilePath, default_value = "-")]
    pub input: PathBuf,

    /// 出力ファイル (`-` は標準出力)
    #[arg(value_hint = ValueHint::FilePath, default_value = "-")]
    pub output_file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 入力の全単語を衝突なく格納できるシードを探索
    SeedSearch(SeedSearchArgs),
}

/// Table parameters. Unset flags fall back to `--config`, then to the defaults.
#[derive(ClapArgs, Debug, Default)]
pub struct TableOptions {
    /// 設定ファイル (JSON)
    #[arg(long, value_hint = ValueHint::FilePath, help_heading = "テーブル")]
    pub config: Option<PathBuf>,

    /// バケット数の指数 (2^order バケット)
    #[arg(long, value_parser = parsers::parse_order, help_heading = "テーブル")]
    pub order: Option<u32>,

    /// バケットあたりのスロット数
    #[arg(long, value_parser = parsers::parse_slots, help_heading = "テーブル")]
    pub slots: Option<usize>,

    /// ハッシュのシード (10進または 0x 16進)
    #[arg(long, value_parser = parsers::parse_seed, help_heading = "テーブル")]
    pub seed: Option<u32>,

    /// 単語格納領域のバイト数 (例: 4M)
    #[arg(long, help_heading = "テーブル")]
    pub arena_capacity: Option<SizeArg>,

    /// 入力の最大バイト数 (例: 512M)
    #[arg(long, help_heading = "テーブル")]
    pub max_input_size: Option<SizeArg>,

    /// バケットが満杯のときの動作
    #[arg(long, value_enum, help_heading = "テーブル")]
    pub policy: Option<CollisionPolicy>,
}

#[derive(ClapArgs, Debug, Default)]
pub struct OutputOptions {
    /// 出力フォーマット
    #[arg(long, value_enum, default_value = "text", help_heading = "出力")]
    pub format: OutputFormat,

    /// 上位N件のみ出力
    #[arg(long, value_parser = parsers::parse_positive_usize, help_heading = "出力")]
    pub top: Option<usize>,

    /// ハッシュマップで再集計して結果を検証
    #[arg(long, help_heading = "出力")]
    pub verify: bool,

    /// 集計サマリを標準エラーに表示
    #[arg(long, help_heading = "出力")]
    pub summary: bool,
}

#[derive(ClapArgs, Debug)]
pub struct SeedSearchArgs {
    /// バケット数の指数
    #[arg(long, default_value_t = wordfreq_core::config::DEFAULT_ORDER, value_parser = parsers::parse_order)]
    pub order: u32,

    /// バケットあたりのスロット数
    #[arg(long, default_value_t = wordfreq_core::config::DEFAULT_SLOTS, value_parser = parsers::parse_slots)]
    pub slots: usize,

    /// 探索を開始するシード
    #[arg(long, default_value_t = 0, value_parser = parsers::parse_seed)]
    pub first_seed: u32,

    /// 探索を終了するシード (含む)
    #[arg(long, default_value_t = u32::MAX, value_parser = parsers::parse_seed)]
    pub last_seed: u32,

    /// 見つけるシードの数
    #[arg(long, default_value_t = 1, value_parser = parsers::parse_positive_usize)]
    pub limit: usize,

    /// スレッド数 (既定: CPU数)
    #[arg(short = 'j', long, value_parser = parsers::parse_positive_usize)]
    pub threads: Option<usize>,

    /// 入力の最大バイト数
    #[arg(long)]
    pub max_input_size: Option<SizeArg>,

    /// 入力ファイル (`-` は標準入力)
    #[arg(value_hint = ValueHint::FilePath, default_value = "-")]
    pub input: PathBuf,
}
