//! DOM renderer
//!
//! Draws the session as absolutely positioned elements inside
//! `#game-world`, and keeps the HUD, screens and content panels in sync
//! with each session snapshot. The renderer only reads session state; clicks
//! on blocks are routed back by the host through [`BLOCK_ID_ATTR`].
//!
//! Missing page elements are logged and skipped.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement};

use crate::content::Catalog;
use crate::presentation::{
    BLOCK_ID_ATTR, CARD_PANEL_IDS, DisplayCard, HudText, SCREEN_IDS, block_style, camera_offset,
    facing_transform, screen_element_id, vertical_offset,
};
use crate::sim::{ActiveLevel, Rect, ScreenState, Session};

/// Frames a clicked block stays enlarged
const BOUNCE_FRAMES: u32 = 12;

pub struct DomRenderer {
    document: Document,
    world: Option<HtmlElement>,
    player: Option<HtmlElement>,
    /// Coin elements with their collectible index
    coins: Vec<(usize, HtmlElement)>,
    /// Block elements with their block index
    blocks: Vec<(usize, HtmlElement)>,
    /// Level number whose elements are currently built
    built_level: Option<u8>,
    /// Card currently filled into its panel
    shown_card: Option<u32>,
    bounce: Option<(u32, u32)>,
    last_hud: Option<HudText>,
    last_screen: Option<ScreenState>,
    pub reduced_motion: bool,
}

impl DomRenderer {
    /// Attach to the current page, `None` without a document
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let world = html_by_id(&document, "game-world");
        let player = html_by_id(&document, "player");
        Some(Self {
            document,
            world,
            player,
            coins: Vec::new(),
            blocks: Vec::new(),
            built_level: None,
            shown_card: None,
            bounce: None,
            last_hud: None,
            last_screen: None,
            reduced_motion: false,
        })
    }

    /// Briefly enlarge a block, as feedback for a hit or reveal
    pub fn bounce_block(&mut self, id: u32) {
        if !self.reduced_motion {
            self.bounce = Some((id, BOUNCE_FRAMES));
        }
    }

    /// Sync the page with the session
    pub fn render(&mut self, session: &Session, catalog: &Catalog, viewport: (f32, f32)) {
        let (viewport_width, viewport_height) = viewport;
        let snapshot = session.snapshot();
        let level = session.active_level();

        if self.built_level != Some(snapshot.level) {
            self.build_level(level);
            self.built_level = Some(snapshot.level);
        }
        self.sync_flags(level);
        self.animate_bounce(level);

        let camera = camera_offset(
            snapshot.position.x,
            viewport_width,
            session.config().level_width,
        );
        let lift = vertical_offset(viewport_height, level.geometry.lowest_bottom());
        if let Some(world) = &self.world {
            set_style(
                world,
                "transform",
                &format!("translate({}px, {}px)", -camera, lift),
            );
        }

        if let Some(player) = &self.player {
            let rect = session.player_rect();
            set_style(player, "left", &px(rect.left() - camera));
            set_style(player, "top", &px(rect.top() + lift));
            set_style(player, "width", &px(rect.size.x));
            set_style(player, "height", &px(rect.size.y));
            if !self.reduced_motion {
                set_style(player, "transform", facing_transform(snapshot.facing));
            }
        }

        let hud = HudText::from_snapshot(&snapshot);
        if self.last_hud.as_ref() != Some(&hud) {
            self.set_text("score", &hud.score);
            self.set_text("lives", &hud.lives);
            self.set_text("current-level", &hud.level);
            self.last_hud = Some(hud);
        }

        if self.last_screen != Some(snapshot.screen) {
            self.show_screen(snapshot.screen);
            if snapshot.screen == ScreenState::Won {
                self.set_text("final-score", &snapshot.score.to_string());
            }
            self.last_screen = Some(snapshot.screen);
        }

        if self.shown_card != snapshot.open_block {
            let card = session
                .open_block()
                .map(|b| DisplayCard::resolve(catalog.lookup(b.kind, &b.payload)));
            self.show_card(card.as_ref());
            self.shown_card = snapshot.open_block;
        }
    }

    /// Replace the world's children with the level's elements
    fn build_level(&mut self, level: &ActiveLevel) {
        let Some(world) = &self.world else { return };
        world.set_inner_html("");
        self.coins.clear();
        self.blocks.clear();
        self.bounce = None;

        let geometry = &level.geometry;
        for platform in &geometry.platforms {
            place(&self.document, world, "platform", platform);
        }
        for (i, coin) in geometry.collectibles.iter().enumerate() {
            if let Some(el) = place(&self.document, world, "coin", coin) {
                self.coins.push((i, el));
            }
        }
        for (i, block) in geometry.blocks.iter().enumerate() {
            let (class, label) = block_style(block.kind, &block.payload);
            if let Some(el) = place(&self.document, world, class, &block.rect) {
                el.set_text_content(Some(label));
                let _ = el.set_attribute(BLOCK_ID_ATTR, &block.id.to_string());
                self.blocks.push((i, el));
            }
        }

        log::debug!(
            "Built {}: {} platforms, {} coins, {} blocks",
            geometry.name,
            geometry.platforms.len(),
            self.coins.len(),
            self.blocks.len()
        );
    }

    /// Mirror collected coins and hit question blocks as CSS classes
    fn sync_flags(&self, level: &ActiveLevel) {
        for (i, el) in &self.coins {
            let collected = level.collected.get(*i).copied().unwrap_or(false);
            let _ = el.class_list().toggle_with_force("collected", collected);
        }
        for (i, el) in &self.blocks {
            let hit = level.hit.get(*i).copied().unwrap_or(false);
            let _ = el.class_list().toggle_with_force("hit", hit);
        }
    }

    fn animate_bounce(&mut self, level: &ActiveLevel) {
        let Some((id, frames)) = self.bounce else { return };
        let scale = if frames > 0 { "scale(1.2)" } else { "scale(1)" };
        let index = level.geometry.blocks.iter().position(|b| b.id == id);
        if let Some((_, el)) = self.blocks.iter().find(|(i, _)| Some(*i) == index) {
            set_style(el, "transform", scale);
        }
        self.bounce = frames.checked_sub(1).map(|f| (id, f));
    }

    fn show_screen(&self, screen: ScreenState) {
        let active = screen_element_id(screen);
        for id in SCREEN_IDS {
            if let Some(el) = self.element(id) {
                let classes = el.class_list();
                let _ = classes.toggle_with_force("active", id == active);
                let _ = classes.toggle_with_force("hidden", id != active);
            }
        }
    }

    /// Show one card in its panel and hide the rest
    fn show_card(&self, card: Option<&DisplayCard>) {
        let panel = card.map(DisplayCard::panel_id);
        for id in CARD_PANEL_IDS {
            if let Some(el) = self.element(id) {
                let _ = el.class_list().toggle_with_force("hidden", panel != Some(id));
            }
        }

        match card {
            None => {}
            Some(DisplayCard::Dialogue { text }) => self.set_text("dialogue-content", text),
            Some(DisplayCard::Skill {
                title,
                details,
                progress,
            }) => {
                self.set_text("skill-title", title);
                self.set_text("skill-details", details);
                if let Some(bar) = html_by_id(&self.document, "skill-progress") {
                    set_style(&bar, "width", &format!("{}%", progress));
                }
            }
            Some(DisplayCard::Project {
                title,
                description,
                github,
                live,
            }) => {
                self.set_text("project-title", title);
                self.set_text("project-desc", description);
                self.set_href("github-link", github);
                self.set_href("live-demo", live);
            }
            Some(DisplayCard::Achievement { title, details }) => {
                self.set_text("achievement-title", title);
                self.set_text("achievement-details", details);
            }
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let el = self.document.get_element_by_id(id);
        if el.is_none() {
            log::warn!("Missing #{} element", id);
        }
        el
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_href(&self, id: &str, href: &str) {
        if let Some(a) = self
            .element(id)
            .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
        {
            a.set_href(href);
        }
    }
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    let el = document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if el.is_none() {
        log::warn!("Missing #{} element", id);
    }
    el
}

/// Create an absolutely positioned element for a world rect
fn place(document: &Document, parent: &HtmlElement, class: &str, rect: &Rect) -> Option<HtmlElement> {
    let el = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    el.set_class_name(class);
    set_style(&el, "position", "absolute");
    set_style(&el, "left", &px(rect.left()));
    set_style(&el, "top", &px(rect.top()));
    set_style(&el, "width", &px(rect.size.x));
    set_style(&el, "height", &px(rect.size.y));
    parent.append_child(&el).ok()?;
    Some(el)
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

fn px(value: f32) -> String {
    format!("{}px", value)
}
