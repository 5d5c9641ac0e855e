use anyhow::Context;
use car_sharing::utils::error::ErrorSeverity;
use car_sharing::utils::{logger, validation::Validate};
use car_sharing::{
    CarPoolEngine, CliConfig, ScenarioConfig, ScenarioReport, ScenarioRunner, StepOutcome,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting car-sharing CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("📁 Loading scenario from: {}", config.scenario);
    let scenario = match ScenarioConfig::from_file(&config.scenario) {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("❌ Failed to load scenario '{}': {}", config.scenario, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(exit_code(e.severity()).max(1));
        }
    };

    if let Err(e) = scenario.validate() {
        tracing::error!("❌ Scenario validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_scenario_summary(&scenario, &config);

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No steps will be executed");
        return Ok(());
    }

    let engine = CarPoolEngine::in_memory();
    let report = ScenarioRunner::new(&engine)
        .fail_fast(config.fail_fast)
        .run(&scenario)
        .await;

    if config.json {
        let json = serde_json::to_string_pretty(&report).context("encoding scenario report")?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    // 根據錯誤嚴重程度決定退出碼
    if let Some(severity) = report.worst_severity() {
        let code = exit_code(severity);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,      // 請求被拒絕，系統正常
        ErrorSeverity::Medium => 2,   // 儲存錯誤
        ErrorSeverity::High => 1,     // 配置錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

fn display_scenario_summary(scenario: &ScenarioConfig, config: &CliConfig) {
    println!("📋 Scenario Summary:");
    println!("  Name: {}", scenario.scenario.name);
    if let Some(description) = &scenario.scenario.description {
        println!("  Description: {}", description);
    }
    println!("  Initial fleet: {} vehicles", scenario.vehicles.len());
    for vehicle in &scenario.vehicles {
        println!("    {} ({} seats)", vehicle.id, vehicle.seats);
    }
    println!("  Steps: {}", scenario.steps.len());

    if config.dry_run {
        for (index, step) in scenario.plan().iter().enumerate() {
            println!("    {:>3}. {}", index, step);
        }
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn print_report(report: &ScenarioReport) {
    println!("🚗 Scenario '{}':", report.name);
    for step in &report.steps {
        println!("  {:>3}. {}", step.index, step.step);
        match &step.outcome {
            StepOutcome::Events { events } => {
                for event in events {
                    println!("       ✅ {}", event);
                }
            }
            StepOutcome::Located { location } => println!("       📍 {:?}", location),
            StepOutcome::Failed { error, severity, .. } => {
                println!("       ❌ {} ({:?})", error, severity)
            }
        }
    }

    let failures = report.failures().count();
    println!();
    println!(
        "{} steps, {} failed, {} skipped",
        report.steps.len(),
        failures,
        report.skipped
    );
}
