use galley_server::{AppState, Config, Server, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 环境 (dotenv, 日志)
    let _ = dotenv::dotenv();
    init_logger();

    print_banner();
    tracing::info!("Galley server starting...");

    // 2. 加载配置 (启动时一次，之后不可变)
    let config = Config::from_env();

    // 3. 初始化应用状态 (数据库迁移 + 种子)
    let state = AppState::initialize(&config).await?;

    // 4. 启动 HTTP 服务器
    let server = Server::with_state(config, state);
    server.run().await
}
