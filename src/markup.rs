// Pure HTML and inline-style builders. Everything the DOM layer writes goes
// through here, so the strings can be checked on the host.

use super::core::greeting::{Greeting, GreetingPage};
use super::core::particle::{EffectParticle, Layer, ParticleKind, Spark, VisualParams};
use super::core::wishes::{UserHit, Wish};
use crate::constants::{Z_FIREWORKS, Z_LANTERN, Z_LIXI, Z_PETALS, Z_TOP};
use std::fmt::Write;

pub static STYLESHEET: &str = include_str!("../assets/festive.css");

pub const LIXI_IMAGE_URL: &str = "/static/images/tet2026/li-xi.svg";
pub const CLB_LOGO_URL: &str = "/static/icons/icon.png";
pub const TET_FONT_URL: &str = "https://fonts.googleapis.com/css2?family=Dancing+Script:wght@700&family=Playfair+Display:wght@700&display=swap";
pub const CHRISTMAS_FONT_URL: &str =
    "https://fonts.googleapis.com/css2?family=Mountains+of+Christmas:wght@700&display=swap";

/// Escape text for interpolation into HTML content or quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escaped text with newlines turned into `<br>`.
pub fn multiline_html(raw: &str) -> String {
    escape_html(raw).replace('\n', "<br>")
}

/// One DOM node to create: class list, inline style and inner HTML.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeSpec {
    pub class: &'static str,
    pub style: String,
    pub html: String,
}

pub fn container_style(z_index: i64) -> String {
    format!(
        "position:fixed;top:0;left:0;width:100%;height:100%;pointer-events:none;z-index:{};overflow:hidden;",
        z_index
    )
}

fn glow(p: &VisualParams, factor: f32) -> String {
    if p.glow {
        format!("box-shadow:0 0 {:.1}px {};", p.size * factor, p.color)
    } else {
        String::new()
    }
}

pub fn particle_node(particle: &EffectParticle) -> NodeSpec {
    let p = &particle.spec.params;
    match (particle.kind(), particle.spec.layer) {
        (ParticleKind::Petal, Layer::Modal) => NodeSpec {
            class: "nyg-modal-petal",
            style: format!(
                "position:absolute;top:-50px;left:{:.2}%;font-size:{:.1}px;color:{};opacity:{:.2};animation:nygPetalFall {:.2}s linear forwards;",
                p.pos.x, p.size, p.color, p.opacity, p.duration_s
            ),
            html: p.glyph.to_string(),
        },
        (ParticleKind::Petal, _) => NodeSpec {
            class: "tet-petal",
            style: format!(
                "position:fixed;top:-50px;left:{:.2}vw;font-size:{:.1}px;opacity:{:.2};color:{};animation:tetFall {:.2}s linear {:.2}s infinite, tetSway {:.2}s ease-in-out infinite;pointer-events:none;z-index:{};will-change:transform;",
                p.pos.x, p.size, p.opacity, p.color, p.duration_s, p.delay_s, p.sway_s, Z_PETALS
            ),
            html: p.glyph.to_string(),
        },
        (ParticleKind::Snowflake, _) => {
            // Negative delay starts each flake mid-fall.
            let mut animation = format!(
                "snowFall {:.2}s linear -{:.2}s infinite, snowSway {:.2}s ease-in-out infinite alternate",
                p.duration_s, p.delay_s, p.sway_s
            );
            if let Some(spin) = p.spin_s {
                _ = write!(animation, ", snowSpin {:.2}s linear infinite", spin);
            }
            NodeSpec {
                class: "snowflake",
                style: format!(
                    "position:absolute;top:-10%;left:{:.2}vw;font-size:{:.1}px;opacity:{:.2};color:{};animation:{};",
                    p.pos.x, p.size, p.opacity, p.color, animation
                ),
                html: p.glyph.to_string(),
            }
        }
        (ParticleKind::Firework | ParticleKind::Explosion, layer) => {
            let (class, position) = match (particle.kind(), layer) {
                (_, Layer::Modal) => ("nyg-modal-firework", "absolute"),
                (ParticleKind::Explosion, _) => ("tet-explosion", "fixed"),
                _ => ("tet-firework", "fixed"),
            };
            NodeSpec {
                class,
                style: format!(
                    "position:{};left:{:.1}px;top:{:.1}px;width:0;height:0;pointer-events:none;z-index:{};",
                    position, p.pos.x, p.pos.y, Z_FIREWORKS
                ),
                html: String::new(),
            }
        }
        (ParticleKind::Rocket, _) => NodeSpec {
            class: "tet-rocket",
            style: format!(
                "position:fixed;left:{:.1}px;bottom:0;--rise:{:.1}px;animation:tetRocketRise {:.3}s linear forwards;z-index:{};",
                p.pos.x, p.distance, p.duration_s, Z_FIREWORKS
            ),
            html: String::new(),
        },
        (ParticleKind::FloatingIcon, _) => NodeSpec {
            class: "tet-lixi-float",
            style: format!(
                "position:fixed;left:{:.1}px;top:{:.1}px;z-index:{};pointer-events:none;animation:tetFloatUp {:.2}s linear forwards;",
                p.pos.x, p.pos.y, Z_LIXI, p.duration_s
            ),
            html: format!(
                "<img src=\"{}\" alt=\"\" style=\"width:{:.0}px;height:auto;\">",
                LIXI_IMAGE_URL, p.size
            ),
        },
        (ParticleKind::CursorFlower, _) => NodeSpec {
            class: "tet-cursor-flower",
            style: format!(
                "position:fixed;left:{:.1}px;top:{:.1}px;font-size:{:.1}px;color:{};pointer-events:none;z-index:{};opacity:{:.2};transform:rotate({:.0}deg);transition:opacity 1s ease;",
                p.pos.x, p.pos.y, p.size, p.color, Z_TOP, p.opacity, p.angle_deg
            ),
            html: p.glyph.to_string(),
        },
        (ParticleKind::Spark | ParticleKind::Twinkle, _) => NodeSpec::default(),
    }
}

/// Child node of a burst. The keyframes depend on which burst owns it.
pub fn spark_node(spark: &Spark, parent: ParticleKind, layer: Layer) -> NodeSpec {
    let p = &spark.params;
    if spark.kind == ParticleKind::Twinkle {
        return NodeSpec {
            class: "tet-twinkle",
            style: format!(
                "position:absolute;left:0;top:0;width:{s:.1}px;height:{s:.1}px;background:{c};border-radius:50%;{g}opacity:0;--angle:{a:.1}deg;--distance:-{d:.1}px;transform:rotate({a:.1}deg) translateY(-{d:.1}px);animation:tetTwinkle {dur:.2}s ease-in-out {del:.2}s forwards;",
                s = p.size,
                c = p.color,
                g = glow(p, 3.0),
                a = p.angle_deg,
                d = p.distance,
                dur = p.duration_s,
                del = p.delay_s,
            ),
            html: String::new(),
        };
    }
    let animation = match (layer, parent, p.willow) {
        (Layer::Modal, _, _) => "nygSpark",
        (_, ParticleKind::Explosion, true) => "tetBottomSparkleWillow",
        (_, ParticleKind::Explosion, false) => "tetBottomSparkle",
        (_, _, true) => "tetSparkleWillow",
        (_, _, false) => "tetSparkle",
    };
    NodeSpec {
        class: "tet-spark",
        style: format!(
            "position:absolute;left:0;top:0;width:{s:.1}px;height:{s:.1}px;background:{c};border-radius:50%;{g}--spark-distance:{d:.1}px;--spark-angle:{a:.1}deg;transform:rotate({a:.1}deg) translateY(0);animation:{anim} {dur:.2}s ease-out forwards;will-change:transform,opacity;",
            s = p.size,
            c = p.color,
            g = glow(p, 2.0),
            d = p.distance,
            a = p.angle_deg,
            anim = animation,
            dur = p.duration_s,
        ),
        html: String::new(),
    }
}

pub fn lantern_node(left: bool) -> NodeSpec {
    let (side, direction) = if left { ("left", "") } else { ("right", " reverse") };
    NodeSpec {
        class: if left {
            "tet-lantern tet-lantern-left"
        } else {
            "tet-lantern tet-lantern-right"
        },
        style: format!(
            "position:fixed;top:55px;{}:5px;font-size:35px;z-index:{};animation:tetSwing 3s ease-in-out infinite{};filter:drop-shadow(0 3px 6px rgba(255,0,0,0.4));pointer-events:none;",
            side, Z_LANTERN, direction
        ),
        html: "🏮".to_string(),
    }
}

// Countdown

pub const COUNTDOWN_CELL_IDS: [&str; 4] = ["tet-days", "tet-hours", "tet-minutes", "tet-seconds"];
const COUNTDOWN_LABELS: [&str; 4] = ["Ngày", "Giờ", "Phút", "Giây"];

pub fn countdown_html(title: &str, cells: &[String; 4]) -> String {
    let mut timer = String::new();
    for (i, ((id, label), value)) in COUNTDOWN_CELL_IDS
        .iter()
        .zip(COUNTDOWN_LABELS)
        .zip(cells)
        .enumerate()
    {
        if i > 0 {
            timer.push_str("<div class=\"tet-countdown-separator\">:</div>");
        }
        _ = write!(
            timer,
            "<div class=\"tet-countdown-item\"><span class=\"tet-countdown-number\" id=\"{}\">{}</span><span class=\"tet-countdown-label\">{}</span></div>",
            id,
            escape_html(value),
            label
        );
    }
    format!(
        "<div class=\"tet-countdown-inner\"><div class=\"tet-countdown-title\">{}</div><div class=\"tet-countdown-timer\">{}</div><button id=\"tet-countdown-close\" title=\"Đóng\">✕</button></div>",
        escape_html(title),
        timer
    )
}

// Intro overlays

pub fn tet_intro_html() -> &'static str {
    concat!(
        "<div class=\"tet-intro-decor tet-intro-decor-top\">🌸 🏮 🏮 🌸</div>",
        "<div class=\"tet-intro-club\">CLB TIN HỌC KHÓA 11</div>",
        "<div id=\"tet-greeting\" class=\"tet-intro-title\">CHÚC MỪNG NĂM MỚI</div>",
        "<div class=\"tet-intro-sub\">TẾT BÍNH TỴ 2026</div>",
        "<div class=\"tet-intro-wishes\">🎊 An Khang Thịnh Vượng 🎊<br>🧧 Vạn Sự Như Ý 🧧</div>",
        "<div class=\"tet-intro-decor tet-intro-decor-bottom\">🧧 🎉 🌺 🎉 🧧</div>",
    )
}

pub const CHRISTMAS_GREETING_TEXT: &str = "Merry Christmas 2025";

// New-year greeting modal

fn wish_body(g: &Greeting, author_line: &str) -> String {
    let title = g
        .title
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| format!("<div class=\"nyg-wish-title\">{}</div>", escape_html(t)))
        .unwrap_or_default();
    format!(
        "{}<div class=\"nyg-wish-message\">{}</div><div class=\"nyg-wish-author\">{}</div>",
        title,
        multiline_html(&g.message),
        author_line
    )
}

const ENDING_FOOTER: &str = "<div class=\"nyg-ending-footer\"><div class=\"nyg-ending-clb\">CLB TIN HỌC KHÓA 11</div><div class=\"nyg-ending-meet\">Hẹn gặp lại trong buổi sinh hoạt đầu năm!</div></div>";

pub fn greeting_page_html(page: &GreetingPage, year: u32) -> String {
    match page {
        GreetingPage::Intro => format!(
            concat!(
                "<div class=\"nyg-intro-page\">",
                "<div class=\"nyg-intro-decorations\"><span class=\"nyg-intro-deco top-left\">🌸</span><span class=\"nyg-intro-deco top-right\">🌸</span></div>",
                "<div class=\"nyg-clb-logo\"><img src=\"{logo}\" alt=\"CLB Tin Học\"></div>",
                "<div class=\"nyg-intro-text\"><div class=\"nyg-clb-name\">CLB TIN HỌC KHÓA 11 - KHOA TOÁN TIN</div>",
                "<div class=\"nyg-clb-univ\">Trường Đại Học Sư Phạm - Đại Học Đà Nẵng</div></div>",
                "<div class=\"nyg-divider\"><span class=\"nyg-divider-line\"></span><span class=\"nyg-divider-line\"></span></div>",
                "<div class=\"nyg-new-year-text\"><div class=\"nyg-happy\">XIN GỬI LỜI</div>",
                "<div class=\"nyg-year\">CHÚC MỪNG NĂM MỚI {year}</div><div class=\"nyg-year-subtitle\">TẾT BÍNH TỴ</div></div>",
                "<div class=\"nyg-intro-hint\"><span class=\"nyg-hint-icon\">👉</span>",
                "<span class=\"nyg-hint-text\">Bấm tiếp theo để nhận những lời chúc nhé!</span></div>",
                "</div>"
            ),
            logo = CLB_LOGO_URL,
            year = year
        ),
        GreetingPage::ClbWish(g) => format!(
            "<div class=\"nyg-wish-page nyg-clb-page\">{}</div>",
            wish_body(g, &format!("— {} —", escape_html(&g.author)))
        ),
        GreetingPage::SuperadminWish(g) => format!(
            "<div class=\"nyg-wish-page nyg-superadmin-page\">{}</div>",
            wish_body(
                g,
                &format!("— BAN CHỦ NHIỆM CLBTH - {} —", escape_html(&g.author))
            )
        ),
        GreetingPage::Supporters(list) => {
            let mut cards = String::new();
            for g in list {
                _ = write!(
                    cards,
                    "<div class=\"nyg-supporter-card\"><div class=\"nyg-supporter-message\">{}</div><div class=\"nyg-supporter-author\">Hỗ trợ — {}</div></div>",
                    multiline_html(&g.message),
                    escape_html(&g.author)
                );
            }
            format!(
                "<div class=\"nyg-wish-page nyg-supporters-page\"><div class=\"nyg-supporters-grid\">{}</div></div>",
                cards
            )
        }
        GreetingPage::Ending(Some(g)) => format!(
            "<div class=\"nyg-wish-page nyg-ending-page\">{}{}</div>",
            wish_body(g, ""),
            ENDING_FOOTER
        ),
        GreetingPage::Ending(None) => format!(
            "<div class=\"nyg-wish-page nyg-ending-page\"><div class=\"nyg-wish-title\">Chúc Mừng Năm Mới {}!</div><div class=\"nyg-wish-message\">Chúc bạn một năm mới tràn đầy sức khỏe, hạnh phúc và thành công!<br><br>Cảm ơn bạn đã đồng hành cùng CLB Tin Học!</div>{}</div>",
            year, ENDING_FOOTER
        ),
    }
}

pub fn greeting_modal_html(pages: &[GreetingPage], year: u32) -> String {
    let mut body = String::new();
    let mut dots = String::new();
    for (i, page) in pages.iter().enumerate() {
        let hidden = if i == 0 { "" } else { " style=\"display:none;\"" };
        _ = write!(
            body,
            "<div class=\"nyg-page\" data-page=\"{}\"{}>{}</div>",
            i,
            hidden,
            greeting_page_html(page, year)
        );
        _ = write!(
            dots,
            "<span class=\"nyg-dot{}\" data-page=\"{}\"></span>",
            if i == 0 { " active" } else { "" },
            i
        );
    }
    format!(
        "<div class=\"nyg-modal-content\"><div class=\"nyg-fireworks-bg\"></div><div class=\"nyg-pages-container\">{}</div><div class=\"nyg-navigation\"><button class=\"nyg-nav-btn nyg-prev\" style=\"visibility:hidden;\">❮ Quay lại</button><div class=\"nyg-dots\">{}</div><button class=\"nyg-nav-btn nyg-next\">Tiếp theo ❯</button></div></div>",
        body, dots
    )
}

pub const SUPPORTER_BUTTON_HTML: &str = "<button id=\"nyg-supporter-btn\" class=\"nyg-supporter-btn\" title=\"Gửi lời chúc năm mới tới toàn thể học viên\">🎊 Gửi lời chúc năm mới tới toàn thể học viên</button>";
pub const TEST_BUTTON_HTML: &str =
    "<button id=\"nyg-test-btn\" class=\"nyg-test-btn\" title=\"Test modal lời chúc năm mới\">🧪 Test Modal</button>";

pub const SUPPORTER_FORM_HTML: &str = concat!(
    "<div class=\"nyg-supporter-form\"><button class=\"nyg-supporter-form-close\">&times;</button>",
    "<div class=\"nyg-form-header\"><h3>🎊 Gửi lời chúc năm mới</h3></div><div class=\"nyg-form-body\">",
    "<div class=\"nyg-form-group\"><label>Tên hiển thị:</label><input type=\"text\" id=\"nyg-display-name\" placeholder=\"Tên của bạn...\" maxlength=\"100\"></div>",
    "<div class=\"nyg-form-group\"><label>Lời chúc của bạn:</label><textarea id=\"nyg-message\" placeholder=\"Nhập lời chúc năm mới của bạn...\" maxlength=\"500\" rows=\"5\"></textarea>",
    "<div class=\"nyg-char-count\"><span id=\"nyg-char-current\">0</span>/500</div></div>",
    "<div id=\"nyg-form-status\" class=\"nyg-form-status\"></div>",
    "<button id=\"nyg-submit-btn\" class=\"nyg-submit-btn\">🎉 Gửi lời chúc</button></div></div>",
);

// Wish mailbox

pub const WISH_BUTTONS_HTML: &str = concat!(
    "<button id=\"tet-send-wish-btn\" class=\"tet-wish-btn\" title=\"Gửi lời chúc\">✉️ Gửi lời chúc <span id=\"tet-remaining-badge\" class=\"tet-remaining-badge\">7</span></button>",
    "<button id=\"tet-mailbox-btn\" class=\"tet-wish-btn\" title=\"Hòm thư\">📬 Hòm thư <span id=\"tet-unread-badge\" class=\"tet-unread-badge\">0</span></button>",
);

pub const SEND_WISH_MODAL_HTML: &str = concat!(
    "<div class=\"tet-modal\"><div class=\"tet-modal-header\"><h3>✉️ Gửi lời chúc Tết</h3><button class=\"tet-modal-close\">&times;</button></div>",
    "<div class=\"tet-modal-body\"><div class=\"tet-form-group\"><label>Người nhận:</label>",
    "<input type=\"text\" id=\"tet-receiver-search\" placeholder=\"Nhập tên người dùng...\" autocomplete=\"off\">",
    "<div id=\"tet-receiver-dropdown\" class=\"tet-dropdown\"></div>",
    "<div id=\"tet-selected-receiver\" class=\"tet-selected-receiver\"></div></div>",
    "<div class=\"tet-form-group\" id=\"tet-broadcast-group\" style=\"display:none;\"><label class=\"tet-checkbox-label\"><input type=\"checkbox\" id=\"tet-broadcast-checkbox\"> 🌟 Gửi cho tất cả mọi người</label></div>",
    "<div class=\"tet-form-group\"><label>Lời chúc (tối đa 500 ký tự):</label>",
    "<textarea id=\"tet-wish-message\" placeholder=\"Viết lời chúc của bạn...\" maxlength=\"500\" rows=\"4\"></textarea>",
    "<div class=\"tet-char-count\"><span id=\"tet-char-count\">0</span>/500</div></div>",
    "<div id=\"tet-send-status\" class=\"tet-status\"></div>",
    "<button id=\"tet-submit-wish\" class=\"tet-submit-btn\">Gửi lời chúc</button></div></div>",
);

pub const MAILBOX_MODAL_HTML: &str = concat!(
    "<div class=\"tet-modal tet-mailbox-modal\"><div class=\"tet-modal-header\"><h3>📬 Hòm thư lời chúc</h3><button class=\"tet-modal-close\">&times;</button></div>",
    "<div class=\"tet-modal-body\"><div id=\"tet-envelopes-container\" class=\"tet-envelopes-container\"></div>",
    "<div id=\"tet-no-wishes\" class=\"tet-no-wishes\" style=\"display:none;\">Bạn chưa nhận được lời chúc nào 😢</div></div></div>",
);

pub const VIEW_WISH_MODAL_HTML: &str = concat!(
    "<button class=\"tet-view-wish-close\">&times;</button>",
    "<div class=\"tet-envelope-animation\" id=\"tet-envelope-animation\"><div class=\"tet-envelope-wrapper\"><div class=\"tet-envelope-outer\">",
    "<div class=\"tet-envelope-flap\"></div><div class=\"tet-envelope-body\"><div class=\"tet-letter\"><div class=\"tet-letter-content\">",
    "<div class=\"tet-letter-sender\" id=\"tet-letter-sender\"></div><div class=\"tet-letter-divider\">🌸 ❀ 🌸</div>",
    "<div class=\"tet-letter-message\" id=\"tet-letter-message\"></div><div class=\"tet-letter-date\" id=\"tet-letter-date\"></div>",
    "</div></div></div></div></div></div>",
);

pub const SET_LIMIT_MODAL_HTML: &str = concat!(
    "<div class=\"tet-modal tet-set-limit-modal\"><div class=\"tet-modal-header\"><h3>⚙️ Đặt giới hạn gửi</h3><button class=\"tet-modal-close\">&times;</button></div>",
    "<div class=\"tet-modal-body\"><div class=\"tet-limit-user-info\"><span>Người dùng: </span><strong id=\"tet-limit-username\">---</strong></div>",
    "<div class=\"tet-limit-current\"><span>Đã gửi: </span><span id=\"tet-limit-sent\">0</span><span> / Giới hạn hiện tại: </span><span id=\"tet-limit-current\">7</span></div>",
    "<div class=\"tet-form-group\"><label>Giới hạn mới (0-100):</label><input type=\"number\" id=\"tet-limit-input\" min=\"0\" max=\"100\" value=\"7\"></div>",
    "<div id=\"tet-limit-status\" class=\"tet-status\"></div>",
    "<button id=\"tet-submit-limit\" class=\"tet-submit-btn\">💾 Lưu giới hạn</button></div></div>",
);

pub const NO_RESULT_HTML: &str = "<div class=\"tet-dropdown-item tet-no-result\">Không tìm thấy</div>";

pub fn user_dropdown_html(users: &[UserHit], superadmin: bool) -> String {
    if users.is_empty() {
        return NO_RESULT_HTML.to_string();
    }
    let mut out = String::new();
    for (i, user) in users.iter().enumerate() {
        let disabled = if user.can_send { "" } else { " tet-user-disabled" };
        let gear = if superadmin {
            format!(
                "<span class=\"tet-set-limit-btn\" data-index=\"{}\" title=\"Đặt giới hạn\">⚙️</span>",
                i
            )
        } else {
            String::new()
        };
        _ = write!(
            out,
            "<div class=\"tet-dropdown-item{}\" data-index=\"{}\"><span class=\"tet-user-name\">{}</span>{}</div>",
            disabled,
            i,
            escape_html(&user.label()),
            gear
        );
    }
    out
}

pub fn selected_receiver_html(username: &str) -> String {
    format!(
        "👤 {} <span class=\"tet-remove-receiver\">✕</span>",
        escape_html(username)
    )
}

/// Class list and inner HTML of one mailbox envelope.
pub fn envelope_node(wish: &Wish) -> (String, String) {
    let mut class = String::from("tet-envelope");
    if wish.is_from_superadmin {
        class.push_str(" tet-envelope-super");
    }
    class.push_str(if wish.is_read {
        " tet-envelope-read"
    } else {
        " tet-envelope-unread"
    });
    let mut html = format!(
        "<img src=\"{}\" class=\"tet-lixi-img\" alt=\"Lì xì\">",
        LIXI_IMAGE_URL
    );
    if wish.is_from_superadmin {
        html.push_str("<span class=\"tet-super-badge\">⭐ Từ CLBTH</span>");
    }
    (class, html)
}
