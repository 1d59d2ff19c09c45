//! Line-oriented course description parser.
//!
//! Format, all coordinates integers:
//! - block of left-border vertices, one `"x y"` per line, blank line ends it
//! - block of right-border vertices, same shape, blank line ends it
//! - one `"x y angle"` line: initial vehicle position and heading
//! - one `"x1 y1 x2 y2"` line: finish segment endpoints
//!
//! Consecutive vertices within a block become border segments.

use super::Course;
use crate::error::{RacelineError, Result};
use crate::geometry::{Segment, Vec2};
use crate::types::VehicleState;
use std::path::Path;

pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Course> {
    let contents = std::fs::read_to_string(&path).map_err(|e| {
        RacelineError::CourseFormat(format!(
            "failed to read course file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;
    from_str(&contents)
}

pub fn from_str(contents: &str) -> Result<Course> {
    let mut lines = contents.lines().enumerate();

    let left_borders = parse_border_block(&mut lines, "left border")?;
    let right_borders = parse_border_block(&mut lines, "right border")?;

    let (line_no, line) = next_content_line(&mut lines, "initial vehicle state")?;
    let fields = parse_integers(line, line_no)?;
    let initial_state = match fields[..] {
        [x, y, angle] => VehicleState::new(Vec2::new(x as f64, y as f64), angle as f64),
        _ => {
            return Err(RacelineError::CourseFormat(format!(
                "line {}: expected 'x y angle', got '{}'",
                line_no + 1,
                line
            )))
        }
    };

    let (line_no, line) = next_content_line(&mut lines, "finish segment")?;
    let fields = parse_integers(line, line_no)?;
    let finish_line = match fields[..] {
        [x1, y1, x2, y2] => Segment::new(
            Vec2::new(x1 as f64, y1 as f64),
            Vec2::new(x2 as f64, y2 as f64),
        ),
        _ => {
            return Err(RacelineError::CourseFormat(format!(
                "line {}: expected 'x1 y1 x2 y2', got '{}'",
                line_no + 1,
                line
            )))
        }
    };

    Course::new(left_borders, right_borders, initial_state, finish_line)
}

type NumberedLines<'a> = std::iter::Enumerate<std::str::Lines<'a>>;

fn parse_border_block(lines: &mut NumberedLines<'_>, what: &str) -> Result<Vec<Segment>> {
    let mut points = Vec::new();
    loop {
        match lines.next() {
            Some((_, line)) if line.trim().is_empty() => break,
            Some((line_no, line)) => {
                let fields = parse_integers(line, line_no)?;
                match fields[..] {
                    [x, y] => points.push(Vec2::new(x as f64, y as f64)),
                    _ => {
                        return Err(RacelineError::CourseFormat(format!(
                            "line {}: expected 'x y', got '{}'",
                            line_no + 1,
                            line
                        )))
                    }
                }
            }
            None => {
                return Err(RacelineError::CourseFormat(format!(
                    "unexpected end of input: {} block not terminated by a blank line",
                    what
                )))
            }
        }
    }
    if points.len() < 2 {
        return Err(RacelineError::CourseFormat(format!(
            "{} block needs at least two vertices, got {}",
            what,
            points.len()
        )));
    }
    Ok(points.windows(2).map(|w| Segment::new(w[0], w[1])).collect())
}

fn next_content_line<'a>(lines: &mut NumberedLines<'a>, what: &str) -> Result<(usize, &'a str)> {
    match lines.next() {
        Some((line_no, line)) if !line.trim().is_empty() => Ok((line_no, line)),
        Some((line_no, _)) => Err(RacelineError::CourseFormat(format!(
            "line {}: expected {} line, got a blank line",
            line_no + 1,
            what
        ))),
        None => Err(RacelineError::CourseFormat(format!(
            "unexpected end of input: missing {} line",
            what
        ))),
    }
}

fn parse_integers(line: &str, line_no: usize) -> Result<Vec<i64>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                RacelineError::CourseFormat(format!(
                    "line {}: non-numeric token '{}'",
                    line_no + 1,
                    token
                ))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRIDOR: &str = "\
0 0
0 100

50 0
50 100

25 0 90
0 100 50 100
";

    #[test]
    fn parses_a_minimal_course() {
        let course = from_str(CORRIDOR).unwrap();
        assert_eq!(course.left_borders.len(), 1);
        assert_eq!(course.right_borders.len(), 1);
        assert_eq!(course.left_border_lengths, vec![100.0]);
        assert_eq!(course.initial_state.position, Vec2::new(25.0, 0.0));
        assert_eq!(course.initial_state.heading, 90.0);
        assert_eq!(course.finish_line.start, Vec2::new(0.0, 100.0));
        assert_eq!(course.finish_line.end, Vec2::new(50.0, 100.0));
    }

    #[test]
    fn multi_vertex_block_becomes_consecutive_segments() {
        let text = "\
0 0
0 60
40 60

50 0
50 70

25 0 90
40 60 50 70
";
        let course = from_str(text).unwrap();
        assert_eq!(course.left_borders.len(), 2);
        assert_eq!(course.left_borders[1].start, Vec2::new(0.0, 60.0));
        assert_eq!(course.left_borders[1].end, Vec2::new(40.0, 60.0));
    }

    #[test]
    fn missing_separator_is_a_format_error() {
        let text = "0 0\n0 100\n50 0\n50 100\n";
        let err = from_str(text).unwrap_err();
        assert!(matches!(err, RacelineError::CourseFormat(_)));
    }

    #[test]
    fn non_numeric_token_is_reported_with_line_number() {
        let text = "0 0\n0 banana\n\n50 0\n50 100\n\n25 0 90\n0 100 50 100\n";
        let err = from_str(text).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "unexpected message: {}", message);
        assert!(message.contains("banana"));
    }

    #[test]
    fn truncated_input_is_a_format_error() {
        let text = "0 0\n0 100\n\n50 0\n50 100\n\n25 0 90\n";
        let err = from_str(text).unwrap_err();
        assert!(err.to_string().contains("finish segment"));
    }

    #[test]
    fn wrong_field_count_is_a_format_error() {
        let text = "0 0\n0 100\n\n50 0\n50 100\n\n25 0\n0 100 50 100\n";
        let err = from_str(text).unwrap_err();
        assert!(err.to_string().contains("x y angle"));
    }
}
