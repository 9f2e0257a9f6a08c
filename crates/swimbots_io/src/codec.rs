//! Line-oriented text format for segment trees, swimbots and ponds.
//!
//! One value per line. Floats use Rust's shortest round-trip formatting, so
//! decoding an encoded value reproduces it bit for bit. Segment trees are
//! written in pre-order; when read back, every segment goes to the arena slot
//! equal to its gene index, which is where the body builder puts it. A body
//! with no segments is written as the single line `empty_tree`.
//!
//! ```text
//! segment
//! 100
//! 50.5
//! 0.25
//! 0
//! children
//! segment
//! ...
//! end_children
//! ```

use crate::error::{IoError, Result};
use std::fmt::{Display, Write as _};
use std::str::FromStr;
use swimbots_data::{
    Body, CommonGene, Food, Goal, Pond, Segment, SegmentGene, Swimbot, Vec2, SEGMENT_SLOTS,
    TRAIT_COUNT,
};

const SEGMENT: &str = "segment";
const EMPTY_TREE: &str = "empty_tree";
const CHILDREN: &str = "children";
const END_CHILDREN: &str = "end_children";
const SWIMBOT: &str = "swimbot";
const END_SWIMBOT: &str = "end_swimbot";
const FAMILY: &str = "family";
const POND: &str = "pond";
const END_POND: &str = "end_pond";
const DEAD: &str = "dead";
const FOOD: &str = "food";
const EATEN: &str = "eaten";
const GOAL_NONE: &str = "none";
const GOAL_FOOD: &str = "food";
const GOAL_MATE: &str = "mate";

/// Accumulates encoded lines.
#[derive(Debug, Default)]
pub struct SnapshotWriter {
    out: String,
}

impl SnapshotWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn line<T: Display>(&mut self, value: T) {
        // Writing into a String cannot fail.
        let _ = writeln!(self.out, "{}", value);
    }

    fn vec2(&mut self, v: &Vec2) {
        self.line(v.x);
        self.line(v.y);
    }

    pub fn segment_tree(&mut self, body: &Body) {
        if body.is_empty() {
            self.line(EMPTY_TREE);
        } else {
            self.segment(body, 0);
        }
    }

    fn segment(&mut self, body: &Body, index: usize) {
        let segment = &body.segments[index];
        self.line(SEGMENT);
        self.vec2(&segment.position);
        self.line(segment.angle);
        self.line(segment.gene_index);
        if segment.has_children() {
            self.line(CHILDREN);
            for &child in &segment.children {
                self.segment(body, child);
            }
            self.line(END_CHILDREN);
        }
    }

    pub fn swimbot(&mut self, bot: &Swimbot) {
        self.line(SWIMBOT);
        match bot.goal {
            Goal::NoGoal => self.line(GOAL_NONE),
            Goal::Food(index) => {
                self.line(GOAL_FOOD);
                self.line(index);
            }
            Goal::Mate(index) => {
                self.line(GOAL_MATE);
                self.line(index);
            }
        }
        self.line(bot.age);
        self.line(bot.energy);
        self.vec2(&bot.position);
        self.vec2(&bot.velocity);
        self.vec2(&bot.acceleration);
        self.line(bot.mass);

        self.line(FAMILY);
        self.line(bot.family.len());
        for member in &bot.family {
            self.line(member);
        }

        self.line(bot.common_gene.angular_movement);
        self.line(bot.common_gene.translational_movement);
        self.line(bot.common_gene.num_segments);
        for gene in &bot.segment_genes {
            for value in gene.traits {
                self.line(value);
            }
        }

        self.segment_tree(&bot.body);
        self.line(END_SWIMBOT);
    }

    pub fn pond(&mut self, pond: &Pond) {
        self.line(POND);
        self.line(pond.width);

        self.line(pond.swimbots.len());
        for slot in &pond.swimbots {
            match slot {
                Some(bot) => self.swimbot(bot),
                None => self.line(DEAD),
            }
        }

        self.line(pond.food.len());
        for slot in &pond.food {
            match slot {
                Some(food) => {
                    self.line(FOOD);
                    self.vec2(&food.position);
                }
                None => self.line(EATEN),
            }
        }
        self.line(END_POND);
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

/// Pulls values off the text one line at a time, tracking the line number.
pub struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
    peeked: Option<&'a str>,
}

impl<'a> LineReader<'a> {
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
            peeked: None,
        }
    }

    /// 1-based number of the last line consumed.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    fn error<S: Into<String>>(&self, msg: S) -> IoError {
        IoError::parse(self.line, msg)
    }

    fn fill(&mut self) -> Option<&'a str> {
        if self.peeked.is_none() {
            self.peeked = self.lines.next();
        }
        self.peeked
    }

    /// Next line without consuming it.
    pub fn peek(&mut self) -> Option<&'a str> {
        self.fill().map(str::trim)
    }

    pub fn next_line(&mut self) -> Result<&'a str> {
        self.fill();
        match self.peeked.take() {
            Some(text) => {
                self.line += 1;
                Ok(text.trim())
            }
            None => Err(IoError::parse(self.line + 1, "unexpected end of input")),
        }
    }

    pub fn expect(&mut self, tag: &str) -> Result<()> {
        let text = self.next_line()?;
        if text == tag {
            Ok(())
        } else {
            Err(self.error(format!("expected `{}`, got `{}`", tag, text)))
        }
    }

    fn value<T: FromStr>(&mut self, kind: &str) -> Result<T> {
        let text = self.next_line()?;
        text.parse::<T>()
            .map_err(|_| self.error(format!("expected {}, got `{}`", kind, text)))
    }

    pub fn float(&mut self) -> Result<f64> {
        self.value("float")
    }

    pub fn index(&mut self) -> Result<usize> {
        self.value("index")
    }

    fn vec2(&mut self) -> Result<Vec2> {
        Ok(Vec2::new(self.float()?, self.float()?))
    }

    /// Errors unless every line has been consumed. Trailing blank lines are fine.
    pub fn finish(mut self) -> Result<()> {
        while let Some(text) = self.peek() {
            if !text.is_empty() {
                self.line += 1;
                return Err(self.error(format!("unexpected trailing `{}`", text)));
            }
            self.peeked = None;
            self.line += 1;
        }
        Ok(())
    }

    pub fn segment_tree(&mut self) -> Result<Body> {
        if self.peek() == Some(EMPTY_TREE) {
            self.expect(EMPTY_TREE)?;
            return Ok(Body::default());
        }

        let mut placed: Vec<Option<Segment>> = Vec::new();
        let root = self.segment_into(&mut placed, None)?;
        if root != 0 {
            return Err(self.error(format!("root segment has gene index {}, expected 0", root)));
        }

        let mut segments = Vec::with_capacity(placed.len());
        for (slot, segment) in placed.into_iter().enumerate() {
            segments.push(
                segment.ok_or_else(|| self.error(format!("no segment with gene index {}", slot)))?,
            );
        }
        Ok(Body { segments })
    }

    /// Reads one segment and its subtree, storing each at the slot of its
    /// gene index. Returns that index.
    fn segment_into(
        &mut self,
        placed: &mut Vec<Option<Segment>>,
        parent: Option<usize>,
    ) -> Result<usize> {
        self.expect(SEGMENT)?;
        let position = self.vec2()?;
        let angle = self.float()?;
        let gene_index = self.index()?;

        if gene_index >= SEGMENT_SLOTS {
            return Err(self.error(format!("gene index {} out of range", gene_index)));
        }
        if parent.is_some_and(|p| gene_index <= p) {
            return Err(self.error(format!(
                "gene index {} attached below a later gene",
                gene_index
            )));
        }
        if placed.len() <= gene_index {
            placed.resize(gene_index + 1, None);
        }
        if placed[gene_index].is_some() {
            return Err(self.error(format!("duplicate gene index {}", gene_index)));
        }
        placed[gene_index] = Some(Segment::new(position, angle, gene_index));

        if self.peek() == Some(CHILDREN) {
            self.expect(CHILDREN)?;
            while self.peek() != Some(END_CHILDREN) {
                let child = self.segment_into(placed, Some(gene_index))?;
                if let Some(segment) = placed[gene_index].as_mut() {
                    segment.children.push(child);
                }
            }
            self.expect(END_CHILDREN)?;
        }
        Ok(gene_index)
    }

    pub fn swimbot(&mut self) -> Result<Swimbot> {
        self.expect(SWIMBOT)?;
        let goal = match self.next_line()? {
            GOAL_NONE => Goal::NoGoal,
            GOAL_FOOD => Goal::Food(self.index()?),
            GOAL_MATE => Goal::Mate(self.index()?),
            other => return Err(self.error(format!("unknown goal `{}`", other))),
        };
        let age = self.float()?;
        let energy = self.float()?;
        let position = self.vec2()?;
        let velocity = self.vec2()?;
        let acceleration = self.vec2()?;
        let mass = self.float()?;

        self.expect(FAMILY)?;
        let count = self.index()?;
        let mut family = Vec::with_capacity(count);
        for _ in 0..count {
            family.push(self.index()?);
        }

        let common_gene = CommonGene {
            angular_movement: self.float()?,
            translational_movement: self.float()?,
            num_segments: self.index()?,
        };
        let mut segment_genes = [SegmentGene::default(); SEGMENT_SLOTS];
        for gene in segment_genes.iter_mut() {
            let mut traits = [0.0; TRAIT_COUNT];
            for value in traits.iter_mut() {
                *value = self.float()?;
            }
            *gene = SegmentGene::new(traits);
        }

        let body = self.segment_tree()?;
        self.expect(END_SWIMBOT)?;

        Ok(Swimbot {
            goal,
            age,
            energy,
            position,
            velocity,
            acceleration,
            mass,
            family,
            common_gene,
            segment_genes,
            body,
        })
    }

    pub fn pond(&mut self) -> Result<Pond> {
        self.expect(POND)?;
        let mut pond = Pond::new(self.float()?);

        let swimbots = self.index()?;
        pond.swimbots.reserve(swimbots);
        for _ in 0..swimbots {
            if self.peek() == Some(DEAD) {
                self.expect(DEAD)?;
                pond.swimbots.push(None);
            } else {
                let bot = self.swimbot()?;
                pond.swimbots.push(Some(bot));
            }
        }

        let food = self.index()?;
        pond.food.reserve(food);
        for _ in 0..food {
            match self.next_line()? {
                EATEN => pond.food.push(None),
                FOOD => {
                    let position = self.vec2()?;
                    pond.food.push(Some(Food { position }));
                }
                other => return Err(self.error(format!("expected food slot, got `{}`", other))),
            }
        }

        self.expect(END_POND)?;
        Ok(pond)
    }
}

#[must_use]
pub fn encode_segment_tree(body: &Body) -> String {
    let mut writer = SnapshotWriter::new();
    writer.segment_tree(body);
    writer.finish()
}

#[must_use]
pub fn encode_swimbot(bot: &Swimbot) -> String {
    let mut writer = SnapshotWriter::new();
    writer.swimbot(bot);
    writer.finish()
}

#[must_use]
pub fn encode_pond(pond: &Pond) -> String {
    let mut writer = SnapshotWriter::new();
    writer.pond(pond);
    writer.finish()
}

pub fn decode_segment_tree(text: &str) -> Result<Body> {
    let mut reader = LineReader::new(text);
    let body = reader.segment_tree()?;
    reader.finish()?;
    Ok(body)
}

pub fn decode_swimbot(text: &str) -> Result<Swimbot> {
    let mut reader = LineReader::new(text);
    let bot = reader.swimbot()?;
    reader.finish()?;
    Ok(bot)
}

pub fn decode_pond(text: &str) -> Result<Pond> {
    let mut reader = LineReader::new(text);
    let pond = reader.pond()?;
    reader.finish()?;
    Ok(pond)
}
