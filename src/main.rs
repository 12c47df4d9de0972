//! Hex Checkers AI CLI
//!
//! 命令行界面，用于调试规则引擎和 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 逐行交换 JSON

use clap::{Parser, Subcommand};
use hexcheckers_ai::test_positions;
use hexcheckers_ai::{
    apply_move_to_fen, evaluate, get_legal_moves_from_fen, render_ascii, AIConfig, AIEngine,
    Board, Color, EngineError,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "hexcheckers-ai")]
#[command(about = "Hex Checkers AI Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 获取合法走法
    Moves {
        /// HC-FEN 字符串或测试局面名称
        #[arg(long)]
        fen: String,

        /// 只列出该阵营的走法 (a / b)
        #[arg(long)]
        color: Option<String>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 选择最佳走法
    Best {
        /// HC-FEN 字符串或测试局面名称
        #[arg(long)]
        fen: String,

        /// 走棋方 (a / b)
        #[arg(long, default_value = "a")]
        color: String,

        /// AI 策略 (alphabeta, exhaustive, random)
        #[arg(long, default_value = "alphabeta")]
        strategy: String,

        /// 搜索深度（完整回合数）
        #[arg(long, default_value = "2")]
        depth: u32,

        /// 随机种子（同分走法的选择）
        #[arg(long)]
        seed: Option<u64>,

        /// 根节点并行分块数
        #[arg(long, default_value = "4")]
        workers: usize,

        /// 返回的走法数量（1 表示在同分走法中随机选一个）
        #[arg(long, default_value = "1")]
        n: usize,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 执行走法并输出新局面
    Apply {
        /// HC-FEN 字符串或测试局面名称
        #[arg(long)]
        fen: String,

        /// 走法记号，如 b1:d2:b3
        #[arg(long = "move")]
        notation: String,
    },

    /// 打印棋盘
    Show {
        /// HC-FEN 字符串或测试局面名称
        #[arg(long)]
        fen: String,

        /// 不输出 ANSI 颜色
        #[arg(long)]
        plain: bool,
    },

    /// 评估局面分数
    Eval {
        /// HC-FEN 字符串或测试局面名称
        #[arg(long)]
        fen: String,

        /// 评估视角 (a / b)
        #[arg(long, default_value = "a")]
        color: String,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct MoveResult {
    #[serde(rename = "move")]
    mv: String,
    score: i64,
}

#[derive(Serialize, Deserialize)]
struct MovesResponse {
    moves: Vec<String>,
    total: usize,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    depth: Option<u32>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    workers: Option<usize>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default, rename = "move")]
    notation: Option<String>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    // eval 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    eval: Option<EvalReport>,
    // apply 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    draw: Option<bool>,
}

/// 局面评估结果
#[derive(Serialize, Deserialize)]
struct EvalReport {
    color: String,
    score: i64,
    men: u32,
    kings: u32,
    opponent_men: u32,
    opponent_kings: u32,
    capture_pieces: u32,
    opponent_capture_pieces: u32,
}

/// 一次搜索的结果
struct SearchReport {
    moves: Vec<MoveResult>,
    nodes: u64,
    elapsed: f64,
}

impl ServerResponse {
    fn success_moves(report: SearchReport) -> Self {
        Self {
            ok: true,
            nodes: Some(report.nodes),
            nps: Some(calc_nps(report.nodes, report.elapsed)),
            elapsed_ms: Some(report.elapsed * 1000.0),
            moves: Some(report.moves),
            ..Default::default()
        }
    }

    fn success_legal_moves(legal_moves: Vec<String>) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            ..Default::default()
        }
    }

    fn success_eval(report: EvalReport) -> Self {
        Self {
            ok: true,
            eval: Some(report),
            ..Default::default()
        }
    }

    fn success_apply(fen: String, draw: bool) -> Self {
        Self {
            ok: true,
            fen: Some(fen),
            draw: Some(draw),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn calc_nps(nodes: u64, elapsed_secs: f64) -> f64 {
    if elapsed_secs > 0.0 {
        nodes as f64 / elapsed_secs
    } else {
        0.0
    }
}

/// 测试局面名称（如 `chain_6x6`）展开成 HC-FEN，其他输入原样返回
fn resolve_fen(input: &str) -> String {
    test_positions::by_name(input)
        .map(str::to_string)
        .unwrap_or_else(|| input.trim().to_string())
}

fn parse_color(s: &str) -> Result<Color, String> {
    let mut chars = s.trim().chars();
    match (chars.next().and_then(Color::from_char), chars.next()) {
        (Some(color), None) => Ok(color),
        _ => Err(format!("Unknown color: {}. Expected a or b", s)),
    }
}

fn fail(e: impl Display) -> ! {
    eprintln!("Error: {}", e);
    std::process::exit(1);
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match text {
        Ok(text) => println!("{}", text),
        Err(e) => fail(e),
    }
}

/// `n == 1` 时走 `find_best_move`（同分随机），否则返回前 n 个评分走法
fn run_search(fen: &str, color: Color, strategy: &str, config: &AIConfig, n: usize) -> Result<SearchReport, EngineError> {
    let board = Board::from_fen(fen)?;
    let ai = AIEngine::from_strategy(strategy, config)?;

    let start = Instant::now();
    let scored = if n <= 1 {
        ai.find_best_move(&board, color)?.into_iter().collect()
    } else {
        ai.select_moves(&board, color, n)?
    };
    let elapsed = start.elapsed().as_secs_f64();

    Ok(SearchReport {
        moves: scored
            .into_iter()
            .map(|sm| MoveResult {
                mv: sm.mv.to_string(),
                score: sm.score,
            })
            .collect(),
        nodes: ai.nodes_searched(),
        elapsed,
    })
}

/// 以 `color` 视角的静态评估（搜索起点即当前局面）
fn run_eval(fen: &str, color: Color) -> Result<EvalReport, EngineError> {
    let board = Board::from_fen(fen)?;
    let state = board.state();
    let opponent = color.opposite();
    Ok(EvalReport {
        color: color.to_string(),
        score: evaluate(&state, &state, color),
        men: state.men(color),
        kings: state.kings(color),
        opponent_men: state.men(opponent),
        opponent_kings: state.kings(opponent),
        capture_pieces: state.capture_pieces(color),
        opponent_capture_pieces: state.capture_pieces(opponent),
    })
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { fen, color, json } => {
            let fen = resolve_fen(&fen);
            let color = color.map(|c| parse_color(&c).unwrap_or_else(|e| fail(e)));
            match get_legal_moves_from_fen(&fen, color) {
                Ok(moves) => {
                    if json {
                        print_json(
                            &MovesResponse {
                                total: moves.len(),
                                moves,
                            },
                            true,
                        );
                    } else {
                        println!("Legal moves ({}):", moves.len());
                        for mv in &moves {
                            println!("  {}", mv);
                        }
                    }
                }
                Err(e) => fail(e),
            }
        }

        Commands::Best {
            fen,
            color,
            strategy,
            depth,
            seed,
            workers,
            n,
            json,
        } => {
            let fen = resolve_fen(&fen);
            let color = parse_color(&color).unwrap_or_else(|e| fail(e));
            let config = AIConfig {
                depth,
                seed,
                workers,
                ..Default::default()
            };

            match run_search(&fen, color, &strategy, &config, n) {
                Ok(report) => {
                    let nps = calc_nps(report.nodes, report.elapsed);
                    if json {
                        print_json(&report.moves, true);
                        eprintln!(
                            "Stats: nodes={}, time={:.3}s, nps={:.0}",
                            report.nodes, report.elapsed, nps
                        );
                    } else {
                        println!("Best moves for {} (strategy={}, depth={}):", color, strategy, depth);
                        if report.moves.is_empty() {
                            println!("  (no legal moves)");
                        }
                        for m in &report.moves {
                            println!("  {} (score: {})", m.mv, m.score);
                        }
                        println!(
                            "\nStats: nodes={}, time={:.3}s, nps={:.0}",
                            report.nodes, report.elapsed, nps
                        );
                    }
                }
                Err(e) => fail(e),
            }
        }

        Commands::Apply { fen, notation } => {
            let fen = resolve_fen(&fen);
            match apply_move_to_fen(&fen, &notation) {
                Ok(next) => println!("{}", next),
                Err(e) => fail(e),
            }
        }

        Commands::Show { fen, plain } => {
            let fen = resolve_fen(&fen);
            match Board::from_fen(&fen) {
                Ok(board) => {
                    println!("{}", render_ascii(&board, !plain));
                    println!("{}", board.to_fen());
                    if board.is_draw_condition() {
                        println!("Draw condition reached");
                    }
                }
                Err(e) => fail(e),
            }
        }

        Commands::Eval { fen, color, json } => {
            let fen = resolve_fen(&fen);
            let color = parse_color(&color).unwrap_or_else(|e| fail(e));
            match run_eval(&fen, color) {
                Ok(report) => {
                    if json {
                        print_json(&report, true);
                    } else {
                        println!("局面评估 ({} 视角): {}", report.color, report.score);
                        println!(
                            "  兵 {} / {}，王 {} / {}，可吃子棋子 {} / {}",
                            report.men,
                            report.opponent_men,
                            report.kings,
                            report.opponent_kings,
                            report.capture_pieces,
                            report.opponent_capture_pieces
                        );
                    }
                }
                Err(e) => fail(e),
            }
        }

        Commands::Server => {
            run_server();
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ServerRequest>(&line) {
            Ok(request) => match request.cmd.as_str() {
                "best" => handle_best_request(&request),
                "moves" => handle_moves_request(&request),
                "eval" => handle_eval_request(&request),
                "apply" => handle_apply_request(&request),
                "quit" => break,
                _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
            },
            Err(e) => ServerResponse::error(&format!("Invalid JSON: {}", e)),
        };

        print_json(&response, false);
        let _ = stdout.flush();
    }
}

fn request_color(request: &ServerRequest) -> Result<Color, String> {
    parse_color(request.color.as_deref().unwrap_or("a"))
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let color = match request_color(request) {
        Ok(c) => c,
        Err(e) => return ServerResponse::error(&e),
    };
    let strategy = request.strategy.as_deref().unwrap_or("alphabeta");
    let defaults = AIConfig::default();
    let config = AIConfig {
        depth: request.depth.unwrap_or(defaults.depth),
        seed: request.seed,
        workers: request.workers.unwrap_or(defaults.workers),
        ..defaults
    };

    match run_search(&resolve_fen(&request.fen), color, strategy, &config, request.n.unwrap_or(1)) {
        Ok(report) => ServerResponse::success_moves(report),
        Err(e) => ServerResponse::error(&format!("AI error: {}", e)),
    }
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    let color = match request.color.as_deref().map(parse_color).transpose() {
        Ok(c) => c,
        Err(e) => return ServerResponse::error(&e),
    };
    match get_legal_moves_from_fen(&resolve_fen(&request.fen), color) {
        Ok(moves) => ServerResponse::success_legal_moves(moves),
        Err(e) => ServerResponse::error(&format!("Invalid position: {}", e)),
    }
}

/// 处理 eval 命令（静态评估）
fn handle_eval_request(request: &ServerRequest) -> ServerResponse {
    let color = match request_color(request) {
        Ok(c) => c,
        Err(e) => return ServerResponse::error(&e),
    };
    match run_eval(&resolve_fen(&request.fen), color) {
        Ok(report) => ServerResponse::success_eval(report),
        Err(e) => ServerResponse::error(&format!("Invalid position: {}", e)),
    }
}

/// 处理 apply 命令
fn handle_apply_request(request: &ServerRequest) -> ServerResponse {
    let notation = match request.notation.as_deref() {
        Some(n) => n,
        None => return ServerResponse::error("Missing field: move"),
    };
    let next = apply_move_to_fen(&resolve_fen(&request.fen), notation)
        .and_then(|fen| Board::from_fen(&fen).map(|board| (fen, board.is_draw_condition())));
    match next {
        Ok((fen, draw)) => ServerResponse::success_apply(fen, draw),
        Err(e) if e.is_illegal_move() => ServerResponse::error(&format!("Illegal move: {}", notation)),
        Err(e) => ServerResponse::error(&format!("Apply error: {}", e)),
    }
}
