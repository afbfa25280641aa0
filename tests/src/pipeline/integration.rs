use std::sync::Arc;
use std::time::Duration;

use reckon_common::config::{Config, Mode};
use reckon_common::models::{Hostname, PathHit};
use reckon_common::target::Target;
use reckon_core::aggregate::Phase;
use reckon_core::chain::FallbackChain;
use reckon_core::indicators::INDICATOR_SOURCE;
use reckon_core::liveness::LivenessCascade;
use reckon_core::operations::whois::EMPTY_RESPONSE;
use reckon_core::operations::{AmassService, PathsService, SubdomainService, WhoisService};
use reckon_protocols::{CrtShJson, FfufLines, HostnameLines, WhoisFields};
use serde_json::{json, Value};

use crate::utils::{FakeBatch, FakeProbe, FakeStatus};

const HARVESTER_OUT: &str = "[*] Hosts found: 3\n\
                             api.example.com\n\
                             www.example.com\n\
                             dev.example.com\n";
const CRTSH_OUT: &str = r#"[
    {"name_value": "shop.example.com\n*.example.com"},
    {"name_value": "API.example.com"}
]"#;

fn target() -> anyhow::Result<Target> {
    Ok(Target::parse("example.com")?)
}

fn names(hosts: &[Hostname]) -> Vec<&str> {
    hosts.iter().map(|h| h.name.as_str()).collect()
}

fn subdomain_service(
    harvester: Arc<FakeProbe>,
    reconng: Arc<FakeProbe>,
    crtsh: Arc<FakeProbe>,
    liveness: LivenessCascade,
) -> SubdomainService {
    let lines = Arc::new(HostnameLines);
    SubdomainService::new(
        vec![
            FallbackChain::new("theHarvester").link(harvester, lines.clone()),
            FallbackChain::new("recon-ng").link(reconng, lines),
            FallbackChain::new("crt.sh").link(crtsh, Arc::new(CrtShJson)),
        ],
        liveness,
    )
}

#[tokio::test]
async fn recon_merges_sources_and_keeps_live_hosts() -> anyhow::Result<()> {
    let service = subdomain_service(
        FakeProbe::replying("theHarvester", HARVESTER_OUT),
        FakeProbe::absent("recon-ng"),
        FakeProbe::replying("crtsh", CRTSH_OUT),
        LivenessCascade::new(
            FakeBatch::reporting(&[
                ("www.example.com", 200),
                ("api.example.com", 301),
                ("dev.example.com", 404),
                ("shop.example.com", 403),
                ("evil.other.com", 200),
            ]),
            FakeStatus::with(&[]),
        ),
    );

    let result = service.run(&target()?, &Config::default()).await;

    assert_eq!(result.phase(), Phase::Completed);
    assert_eq!(names(result.entities()), ["www.example.com", "api.example.com", "shop.example.com"]);
    assert_eq!(result.sources_of("api.example.com"), ["crtsh", "theHarvester"]);
    assert!(result.sources_of("dev.example.com").is_empty());

    let doc = serde_json::to_value(&result)?;
    assert_eq!(doc["target"], "example.com");
    assert_eq!(doc["count"], 3);
    assert_eq!(doc["status"], "completed");
    assert_eq!(doc["sources"], json!({"crtsh": 2, "theHarvester": 2}));
    assert_eq!(
        doc["subdomains"][1],
        json!({"name": "api.example.com", "sources": ["crtsh", "theHarvester"]})
    );
    assert!(doc.get("debug").is_none());

    let stamp = doc["timestamp"].as_str().unwrap_or_default();
    assert_eq!(stamp.len(), "2025-01-01T00:00:00Z".len());
    assert!(stamp.ends_with('Z'));
    Ok(())
}

#[tokio::test]
async fn first_seen_order_and_provenance_survive_the_pipeline() -> anyhow::Result<()> {
    let service = subdomain_service(
        FakeProbe::replying("A", "api.example.com\n"),
        FakeProbe::replying("B", "www.example.com\napi.example.com\n"),
        FakeProbe::absent("crtsh"),
        LivenessCascade::new(
            FakeBatch::absent(),
            FakeStatus::with(&[("api.example.com", 200), ("www.example.com", 200)]),
        ),
    );

    let result = service.run(&target()?, &Config::default()).await;

    assert_eq!(names(result.entities()), ["api.example.com", "www.example.com"]);
    assert_eq!(result.sources_of("api.example.com"), ["A", "B"]);
    assert_eq!(result.sources_of("www.example.com"), ["B"]);
    Ok(())
}

#[tokio::test]
async fn nothing_found_is_an_empty_completed_result() -> anyhow::Result<()> {
    let batch = FakeBatch::reporting(&[]);
    let service = subdomain_service(
        FakeProbe::failing("theHarvester", "exited with status 2"),
        FakeProbe::absent("recon-ng"),
        FakeProbe::replying("crtsh", "[]"),
        LivenessCascade::new(batch.clone(), FakeStatus::with(&[])),
    );

    let result = service.run(&target()?, &Config::default()).await;

    assert_eq!(result.count(), 0);
    assert_eq!(result.phase(), Phase::Completed);
    assert_eq!(batch.calls(), 0, "no candidates, nothing to probe");
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn slow_source_does_not_hold_the_result() -> anyhow::Result<()> {
    let stuck = FakeProbe::slow("recon-ng", "late.example.com\n", Duration::from_secs(3600));
    let batch = FakeBatch::reporting_after(&[("api.example.com", 200)], Duration::from_millis(50));
    let service = subdomain_service(
        FakeProbe::replying("theHarvester", "api.example.com\n"),
        stuck.clone(),
        FakeProbe::absent("crtsh"),
        LivenessCascade::new(batch.clone(), FakeStatus::with(&[])),
    );
    let config = Config {
        timeout: Duration::from_secs(30),
        ..Config::default()
    };

    let started = tokio::time::Instant::now();
    let result = service.run(&target()?, &config).await;

    assert!(started.elapsed() <= Duration::from_secs(30));
    assert_eq!(stuck.calls(), 1);
    assert_eq!(batch.calls(), 1);
    assert_eq!(result.phase(), Phase::Completed);
    assert_eq!(names(result.entities()), ["api.example.com"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn hung_source_leaves_time_for_per_host_checks() -> anyhow::Result<()> {
    let status = FakeStatus::with_delay(
        &[("api.example.com", 200), ("www.example.com", 302)],
        Duration::from_millis(500),
    );
    let service = subdomain_service(
        FakeProbe::replying("theHarvester", "api.example.com\nwww.example.com\n"),
        FakeProbe::slow("recon-ng", "late.example.com\n", Duration::from_secs(3600)),
        FakeProbe::absent("crtsh"),
        LivenessCascade::new(FakeBatch::absent(), status.clone()),
    );
    let config = Config {
        timeout: Duration::from_secs(30),
        ..Config::default()
    };

    let result = service.run(&target()?, &config).await;

    assert_eq!(status.calls(), 2);
    assert_eq!(names(result.entities()), ["api.example.com", "www.example.com"]);
    Ok(())
}

#[tokio::test]
async fn debug_output_is_attached_when_asked() -> anyhow::Result<()> {
    let service = subdomain_service(
        FakeProbe::replying("theHarvester", "api.example.com\n"),
        FakeProbe::absent("recon-ng"),
        FakeProbe::absent("crtsh"),
        LivenessCascade::new(FakeBatch::reporting(&[("api.example.com", 200)]), FakeStatus::with(&[])),
    );
    let config = Config {
        debug: true,
        ..Config::default()
    };

    let doc = serde_json::to_value(service.run(&target()?, &config).await)?;
    let debug = &doc["debug"];
    assert!(debug.is_object(), "debug section missing: {doc}");
    assert!(debug.to_string().contains("api.example.com"));
    Ok(())
}

#[tokio::test]
async fn amass_falls_back_to_indicator_hosts() -> anyhow::Result<()> {
    let probe = FakeProbe::absent("amass");
    let chain = FallbackChain::new("amass").link(probe.clone(), Arc::new(HostnameLines));
    let service = AmassService::new(chain, Mode::Active);

    let report = service.run(&target()?, &Config::default()).await;

    assert_eq!(probe.calls(), 1);
    assert_eq!(report.result.count(), 12);
    assert!(report.result.entities().iter().all(|h| h.name.ends_with(".example.com")));

    let doc = serde_json::to_value(&report)?;
    assert_eq!(doc["mode"], "active");
    assert_eq!(doc["command"], "amass example.com");
    assert_eq!(doc["sources"][INDICATOR_SOURCE], 12);
    assert_eq!(doc["status"], "completed");
    Ok(())
}

#[tokio::test]
async fn amass_results_win_over_indicators() -> anyhow::Result<()> {
    let chain = FallbackChain::new("amass").link(
        FakeProbe::replying("amass", "vpn.example.com\nmail.example.com\n"),
        Arc::new(HostnameLines),
    );
    let report = AmassService::new(chain, Mode::Passive)
        .run(&target()?, &Config::default())
        .await;

    assert_eq!(names(report.result.entities()), ["vpn.example.com", "mail.example.com"]);
    assert_eq!(report.result.sources_of("vpn.example.com"), ["amass"]);
    Ok(())
}

#[tokio::test]
async fn whois_uses_the_first_source_with_a_record() -> anyhow::Result<()> {
    let fields = Arc::new(WhoisFields);
    let cli = FakeProbe::absent("whois");
    let verisign = FakeProbe::replying("whois.verisign-grs.com", "No match for domain.\n");
    let iana = FakeProbe::replying(
        "whois.iana.org",
        "Registrar: Example Registrar, Inc.\nRegistry Expiry Date: 2025-03-01T00:00:00Z\n",
    );
    let unused = FakeProbe::replying("whois.nic.ru", "Registrar: Other\n");
    let chain = FallbackChain::new("whois")
        .link(cli, fields.clone())
        .link(verisign.clone(), fields.clone())
        .link(iana, fields.clone())
        .link(unused.clone(), fields);

    let report = WhoisService::new(chain).run(&target()?, &Config::default()).await;

    assert_eq!(report.source.as_deref(), Some("whois.iana.org"));
    assert_eq!(report.record.registrar, "Example Registrar, Inc.");
    assert_eq!(report.record.expiration_date, "2025-03-01");
    assert_eq!(report.status, Phase::Completed);
    assert!(report.error.is_none());
    assert_eq!(verisign.calls(), 1);
    assert_eq!(unused.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn whois_reports_an_error_when_every_source_is_empty() -> anyhow::Result<()> {
    let chain = FallbackChain::new("whois")
        .link(FakeProbe::absent("whois"), Arc::new(WhoisFields))
        .link(FakeProbe::failing("whois.iana.org", "connection refused"), Arc::new(WhoisFields));

    let report = WhoisService::new(chain).run(&target()?, &Config::default()).await;

    assert!(report.source.is_none());
    assert_eq!(report.error.as_deref(), Some(EMPTY_RESPONSE));
    assert_eq!(report.record.domain, "example.com");

    let doc: Value = serde_json::to_value(&report)?;
    assert_eq!(doc["domain"], "example.com");
    assert_eq!(doc["status"], "completed");
    Ok(())
}

#[tokio::test]
async fn paths_come_back_in_reported_order() -> anyhow::Result<()> {
    let chain = FallbackChain::new("paths").link(
        FakeProbe::replying("ffuf", "admin\nlogin\nadmin\n"),
        Arc::new(FfufLines),
    );

    let result = PathsService::new(chain).run(&target()?, &Config::default()).await;

    let paths: Vec<&str> = result.entities().iter().map(|p: &PathHit| p.path.as_str()).collect();
    assert_eq!(paths, ["admin", "login"]);
    assert_eq!(serde_json::to_value(&result)?["paths"][0]["sources"], json!(["ffuf"]));
    Ok(())
}

#[test]
fn paths_need_a_wordlist() {
    assert!(PathsService::from_config(&Config::default()).is_err());
}
