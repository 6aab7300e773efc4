// HTML and inline-style generation for particles, the countdown and the
// greeting/wish widgets.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/core/mod.rs"]
mod core;
#[path = "../src/markup.rs"]
mod markup;

use crate::core::greeting::{Greeting, GreetingPage};
use crate::core::particle::{self, Layer, ParticleSpec};
use crate::core::wishes::{UserHit, Wish};
use crate::core::{DeviceTier, EffectParticle, ParticleId, ParticleKind, PerfSettings};
use crate::markup::*;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(2026)
}

fn live(spec: ParticleSpec) -> EffectParticle {
    EffectParticle {
        id: ParticleId(1),
        spawn_ms: 0.0,
        spec,
    }
}

#[test]
fn user_text_is_escaped() {
    assert_eq!(
        escape_html(r#"<script>alert("x") & 'y'</script>"#),
        "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
    );
    assert_eq!(multiline_html("a<b\nc"), "a&lt;b<br>c");
}

#[test]
fn petals_and_snow_use_looping_animations() {
    let petal = particle_node(&live(particle::petal(&mut rng())));
    assert_eq!(petal.class, "tet-petal");
    assert!(petal.style.contains("tetFall"));
    assert!(petal.style.contains("infinite"));

    let flake = particle_node(&live(particle::snowflake(&mut rng(), true)));
    assert_eq!(flake.class, "snowflake");
    assert!(flake.style.contains("snowFall"));
    assert!(flake.style.contains("#ffffff"));
}

#[test]
fn snowflakes_start_mid_fall() {
    let spec = particle::snowflake(&mut rng(), false);
    let delay = spec.params.delay_s;
    let flake = particle_node(&live(spec));
    assert!(flake
        .style
        .contains(&format!("linear -{:.2}s infinite", delay)));
}

#[test]
fn burst_classes_depend_on_kind_and_layer() {
    let perf = PerfSettings::for_tier(DeviceTier::High, false);
    let viewport = Vec2::new(1000.0, 700.0);

    let sky = particle_node(&live(particle::firework(&mut rng(), &perf, viewport)));
    assert_eq!(sky.class, "tet-firework");

    let boom = live(particle::explosion(&mut rng(), &perf, Vec2::new(10.0, 20.0)));
    let node = particle_node(&boom);
    assert_eq!(node.class, "tet-explosion");
    assert!(node.style.contains("left:10.0px;top:20.0px"));
    let spark = boom
        .spec
        .sparks
        .iter()
        .find(|s| s.kind == ParticleKind::Spark)
        .expect("explosion has sparks");
    let child = spark_node(spark, ParticleKind::Explosion, Layer::Fireworks);
    assert_eq!(child.class, "tet-spark");
    assert!(child.style.contains("tetBottomSparkle"));

    let modal = particle::modal_firework(&mut rng(), DeviceTier::High, viewport)
        .expect("high tier draws modal fireworks");
    assert_eq!(particle_node(&live(modal)).class, "nyg-modal-firework");
}

#[test]
fn rocket_rises_by_its_travel_distance() {
    let rocket = particle::rocket(&mut rng(), Vec2::new(800.0, 600.0));
    let node = particle_node(&live(rocket.clone()));
    assert_eq!(node.class, "tet-rocket");
    assert!(node
        .style
        .contains(&format!("--rise:{:.1}px", rocket.params.distance)));
}

#[test]
fn twinkles_render_separately_from_sparks() {
    let perf = PerfSettings::for_tier(DeviceTier::High, false);
    let sky = particle::firework(&mut rng(), &perf, Vec2::new(1000.0, 700.0));
    let twinkle = sky
        .sparks
        .iter()
        .find(|s| s.kind == ParticleKind::Twinkle)
        .expect("high tier fireworks twinkle");
    let node = spark_node(twinkle, ParticleKind::Firework, Layer::Fireworks);
    assert_eq!(node.class, "tet-twinkle");
    assert!(node.style.contains("tetTwinkle"));
}

#[test]
fn floating_icon_is_an_image() {
    let icon = particle_node(&live(particle::floating_lixi(
        &mut rng(),
        Vec2::new(800.0, 600.0),
    )));
    assert_eq!(icon.class, "tet-lixi-float");
    assert!(icon.html.contains(LIXI_IMAGE_URL));
}

#[test]
fn countdown_html_has_all_cells() {
    let cells = ["01", "02", "03", "04"].map(str::to_string);
    let html = countdown_html("Đếm ngược <Tết>", &cells);
    for id in COUNTDOWN_CELL_IDS {
        assert!(html.contains(&format!("id=\"{}\"", id)));
    }
    assert!(html.contains("Đếm ngược &lt;Tết&gt;"));
    assert!(html.contains("tet-countdown-close"));
}

#[test]
fn greeting_modal_shows_first_page_only() {
    let pages = vec![
        GreetingPage::Intro,
        GreetingPage::ClbWish(Greeting {
            title: Some("Lời chúc".to_string()),
            message: "<i>Vui</i>\nKhỏe".to_string(),
            author: "CLB".to_string(),
        }),
        GreetingPage::Ending(None),
    ];
    let html = greeting_modal_html(&pages, 2026);
    assert_eq!(html.matches("class=\"nyg-page\"").count(), 3);
    assert_eq!(html.matches("display:none").count(), 2);
    assert_eq!(html.matches("nyg-dot active").count(), 1);
    assert!(html.contains("CHÚC MỪNG NĂM MỚI 2026"));
    assert!(html.contains("KHOA TOÁN TIN"));
    assert!(html.contains(CLB_LOGO_URL));
    assert!(html.contains("nyg-intro-hint"));
    assert!(html.contains("&lt;i&gt;Vui&lt;/i&gt;<br>Khỏe"));
    assert!(html.contains("nyg-fireworks-bg"));
}

#[test]
fn dropdown_marks_users_who_already_received() {
    let users = vec![
        UserHit {
            id: 1,
            username: "an".to_string(),
            display_name: String::new(),
            can_send: true,
        },
        UserHit {
            id: 2,
            username: "<b>".to_string(),
            display_name: String::new(),
            can_send: false,
        },
    ];
    let html = user_dropdown_html(&users, true);
    assert_eq!(html.matches("tet-set-limit-btn").count(), 2);
    assert_eq!(html.matches("tet-user-disabled").count(), 1);
    assert!(html.contains("&lt;b&gt;"));
    assert!(!user_dropdown_html(&users, false).contains("tet-set-limit-btn"));
    assert_eq!(user_dropdown_html(&[], false), NO_RESULT_HTML);
}

#[test]
fn envelopes_reflect_sender_and_read_state() {
    let wish = Wish {
        id: 1,
        sender_name: "Admin".to_string(),
        is_from_superadmin: true,
        message: "Hi".to_string(),
        is_read: false,
        created_at: String::new(),
    };
    let (class, html) = envelope_node(&wish);
    assert_eq!(class, "tet-envelope tet-envelope-super tet-envelope-unread");
    assert!(html.contains("tet-super-badge"));

    let read = Wish {
        is_from_superadmin: false,
        is_read: true,
        ..wish
    };
    let (class, html) = envelope_node(&read);
    assert_eq!(class, "tet-envelope tet-envelope-read");
    assert!(!html.contains("tet-super-badge"));
}

#[test]
fn stylesheet_defines_the_animations_used_inline() {
    for name in [
        "tetFall",
        "tetSway",
        "tetSparkle",
        "tetBottomSparkle",
        "tetTwinkle",
        "tetRocketRise",
        "tetFloatUp",
        "snowFall",
        "nygPetalFall",
        "nygSpark",
    ] {
        assert!(
            STYLESHEET.contains(&format!("@keyframes {}", name)),
            "missing keyframes {}",
            name
        );
    }
}
