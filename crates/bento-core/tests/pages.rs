// File: crates/bento-core/tests/pages.rs
// Purpose: Pages compose from fixtures on disk and serialize to SVG.

use bento_core::fixtures::{Channels, Lead, Order, PipelineMonth, RevenueDay, Vehicle};
use bento_core::{DashboardContext, Fixtures, PageId};

fn small_fixtures() -> Fixtures {
    let mut f = Fixtures::default();
    for i in 0..6 {
        let date = format!("2025-01-0{}", i + 1);
        f.vehicles.push(Vehicle {
            id: format!("veh-{}", 1000 + i),
            hub: format!("Hub-{}", i % 2 + 1),
            status: if i % 3 == 0 { "idle".into() } else { "in_transit".into() },
            speed_kmh: 10.0 * i as f64,
            health_score: 60.0 + i as f64,
            ..Default::default()
        });
        f.orders.push(Order {
            id: format!("ord-{i}"),
            date: date.clone(),
            amount: 100.0 + i as f64,
            category: "home".into(),
            status: "delivered".into(),
            hub: "Hub-1".into(),
            ..Default::default()
        });
        f.revenue.push(RevenueDay {
            date: date.clone(),
            revenue: 1000.0,
            cost: 600.0,
            profit: 400.0,
            channels: Channels { online: 500.0, retail: 300.0, partners: 200.0 },
        });
        f.traffic.insert(date.clone(), vec![i as f64; 24]);
        f.leads.push(Lead { id: format!("lead-{i}"), created_at: date, source: "web".into(), stage: "won".into(), value: 1.0, converted: i % 2 == 0 });
    }
    f.pipeline_monthly.push(PipelineMonth { month: "2025-01".into(), by_stage: [("lead".to_string(), 10.0), ("won".to_string(), 2.0)].into() });
    f
}

#[test]
fn every_page_renders_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    small_fixtures().save(dir.path()).unwrap();
    let fixtures = Fixtures::load(dir.path()).unwrap();
    let ctx = DashboardContext::default();
    for id in PageId::ALL {
        let scene = id.build(&fixtures).render(&ctx, 1280.0);
        assert_eq!(scene.size.width, 1280.0, "{id}");
        assert!(scene.tagged("card:").count() > 0 || scene.tagged("kpi:card").count() > 0, "{id}");
        let svg = scene.to_svg();
        assert!(svg.starts_with("<svg") && svg.trim_end().ends_with("</svg>"), "{id}");
        assert!(svg.contains(&format!(r#"data-tag="nav:{}""#, id.slug())), "{id}");
    }
}

#[test]
fn empty_data_dir_still_renders_every_page() {
    let dir = tempfile::tempdir().unwrap();
    let fixtures = Fixtures::load(dir.path()).unwrap();
    let ctx = DashboardContext::from_theme_name("light");
    for id in PageId::ALL {
        let scene = id.build(&fixtures).render(&ctx, 1024.0);
        assert!(scene.size.height > 0.0, "{id}");
    }
}
