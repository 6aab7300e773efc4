use crate::constants::CURSOR_FLOWER_FADE_DELAY_MS;
use crate::core::particle::{EffectParticle, Layer, ParticleId, ParticleKind};
use crate::core::scheduler::EffectSurface;
use crate::dom;
use crate::markup::{self, NodeSpec};
use crate::timers;
use fnv::FnvHashMap;
use web_sys as web;

fn build_node(document: &web::Document, spec: &NodeSpec) -> Option<web::HtmlElement> {
    let el = dom::create_element(document, "div", None, spec.class)?;
    _ = el.set_attribute("style", &spec.style);
    if !spec.html.is_empty() {
        el.set_inner_html(&spec.html);
    }
    Some(el)
}

/// DOM-backed particle surface. Owns the overlay containers and one node
/// per live particle.
pub struct DomSurface {
    document: web::Document,
    layers: FnvHashMap<Layer, web::Element>,
    nodes: FnvHashMap<ParticleId, web::Element>,
}

impl DomSurface {
    pub fn new(document: web::Document) -> Self {
        Self {
            document,
            layers: FnvHashMap::default(),
            nodes: FnvHashMap::default(),
        }
    }

    /// Create a full-viewport overlay container for `layer`.
    pub fn mount_layer(&mut self, layer: Layer, id: &str, z_index: i64) -> bool {
        dom::remove_by_id(&self.document, id);
        match dom::append_to_body(
            &self.document,
            Some(id),
            "",
            &markup::container_style(z_index),
            "",
        ) {
            Some(el) => {
                self.layers.insert(layer, el.into());
                true
            }
            None => false,
        }
    }

    /// Where modal particles go; `None` once the modal has closed.
    pub fn set_modal_host(&mut self, host: Option<web::Element>) {
        match host {
            Some(el) => {
                self.layers.insert(Layer::Modal, el);
            }
            None => {
                self.layers.remove(&Layer::Modal);
            }
        }
    }

    /// Remove the overlay containers. Live nodes must be detached first.
    pub fn unmount(&mut self) {
        for (layer, el) in self.layers.drain() {
            if layer != Layer::Modal {
                el.remove();
            }
        }
    }

    fn container(&self, layer: Layer) -> Option<web::Element> {
        match layer {
            Layer::Page => self.document.body().map(Into::into),
            _ => self.layers.get(&layer).cloned(),
        }
    }
}

impl EffectSurface for DomSurface {
    fn attach(&mut self, particle: &EffectParticle) -> bool {
        let Some(container) = self.container(particle.spec.layer) else {
            return false;
        };
        let Some(node) = build_node(&self.document, &markup::particle_node(particle)) else {
            return false;
        };
        for spark in &particle.spec.sparks {
            let spec = markup::spark_node(spark, particle.kind(), particle.spec.layer);
            if let Some(child) = build_node(&self.document, &spec) {
                _ = node.append_child(&child);
            }
        }
        if container.append_child(&node).is_err() {
            return false;
        }
        if particle.kind() == ParticleKind::CursorFlower {
            let fading = node.clone();
            timers::set_timeout(CURSOR_FLOWER_FADE_DELAY_MS, move || {
                dom::set_style(&fading, "opacity", "0");
            });
        }
        self.nodes.insert(particle.id, node.into());
        true
    }

    fn detach(&mut self, id: ParticleId) {
        if let Some(node) = self.nodes.remove(&id) {
            node.remove();
        }
    }
}
