use crate::infra::InMemoryAlertPublisher;
use clap::Args;
use sleep_cdss::config::AppConfig;
use sleep_cdss::error::AppError;
use sleep_cdss::workflows::therapy::{
    PatientSnapshot, SnapshotUpdate, TherapyTriageService, TriageAlert, TriageReport,
    TriageServiceError,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct EvaluateArgs {
    /// Average nightly device usage in hours (defaults to the baseline patient)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) usage_hours: Option<f64>,
    /// Mask leak rate in L/s
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) leak_lps: Option<f64>,
    /// Residual apnea-hypopnea index (events/hour)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) ahi: Option<f64>,
    /// Oxygen desaturation index (events/hour)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) odi: Option<f64>,
    /// Average SpO2 percent
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) spo2: Option<f64>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the per-gate breakdown for every scenario
    #[arg(long)]
    pub(crate) gates: bool,
}

struct Scenario {
    name: &'static str,
    snapshot: PatientSnapshot,
}

fn scenario(name: &'static str, usage_hours: f64, leak_lps: f64, ahi: f64, odi: f64) -> Scenario {
    Scenario {
        name,
        snapshot: PatientSnapshot {
            usage_hours,
            leak_lps,
            ahi,
            odi,
            spo2: 96.0,
        },
    }
}

fn reference_scenarios() -> Vec<Scenario> {
    vec![
        scenario("Short nights", 3.9, 0.1, 4.0, 3.0),
        scenario("Leak at the limit", 4.0, 0.4, 4.0, 3.0),
        scenario("Residual AHI at target", 6.5, 0.1, 10.0, 3.0),
        scenario("Desaturation without flow events", 6.5, 0.1, 4.0, 11.0),
        scenario("Stable therapy", 6.5, 0.1, 4.0, 9.0),
        scenario("Corrupt leak reading", 6.5, -0.1, 4.0, 3.0),
    ]
}

fn triage_service(
) -> Result<(TherapyTriageService<InMemoryAlertPublisher>, InMemoryAlertPublisher), AppError> {
    let config = AppConfig::load()?;
    let alerts = InMemoryAlertPublisher::default();
    let service = TherapyTriageService::new(Arc::new(alerts.clone()), config.thresholds)?;
    Ok((service, alerts))
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        usage_hours,
        leak_lps,
        ahi,
        odi,
        spo2,
        json,
    } = args;

    let snapshot = PatientSnapshot::baseline().merged(&SnapshotUpdate {
        usage_hours,
        leak_lps,
        ahi,
        odi,
        spo2,
    });

    let (service, alerts) = triage_service()?;
    let report = service.report(snapshot)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        render_triage_report(&report, true);
        render_alerts(&alerts.drain());
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let (service, alerts) = triage_service()?;

    println!("Sleep therapy triage demo");
    let sheet = service.threshold_sheet();
    println!("\nActive gates");
    for (position, entry) in sheet.gates.iter().enumerate() {
        println!(
            "{}. {} ({}) -> {:?} on failure",
            position + 1,
            entry.gate_label,
            entry.criterion,
            entry.failure_status
        );
    }

    for scenario in reference_scenarios() {
        println!("\n== {}", scenario.name);
        println!("{}", describe_snapshot(&scenario.snapshot));

        match service.report(scenario.snapshot) {
            Ok(report) => {
                render_triage_report(&report, args.gates);
                render_alerts(&alerts.drain());
            }
            Err(TriageServiceError::Validation(err)) => {
                println!("Rejected before evaluation: {err}");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn describe_snapshot(snapshot: &PatientSnapshot) -> String {
    format!(
        "usage {}h | leak {} L/s | AHI {} | ODI {} | SpO2 {}%",
        snapshot.usage_hours, snapshot.leak_lps, snapshot.ahi, snapshot.odi, snapshot.spo2
    )
}

fn render_triage_report(report: &TriageReport, include_gates: bool) {
    println!("Status: {}", report.status_label);
    println!("Finding: {}", report.message);
    println!("Action: {}", report.recommended_action);

    if include_gates {
        println!("Gates");
        for entry in &report.gates {
            println!(
                "- {}: {} [{}]",
                entry.gate_label, entry.status_label, entry.criterion
            );
        }
    }
}

fn render_alerts(alerts: &[TriageAlert]) {
    if alerts.is_empty() {
        println!("Alerts: none");
        return;
    }

    for alert in alerts {
        println!("Alert -> {} ({})", alert.recipient.label(), alert.template);
    }
}
