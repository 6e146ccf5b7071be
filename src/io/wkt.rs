use super::*;

/// Write a geometry as WKT. Polygon rings are closed.
///
/// # Example
/// ```rust
/// # use polycapture::*;
/// let g = Geometry::LineString(Polyline2::new([[0.0, 0.0], [10.0, 0.5]]).unwrap());
/// assert_eq!(io::wkt::to_wkt(&g), "LINESTRING (0 0, 10 0.5)");
/// ```
pub fn to_wkt(geometry: &Geometry) -> String {
    fn coords(buf: &mut String, ps: impl Iterator<Item = Point2>) {
        buf.push('(');
        for (i, [x, y]) in ps.enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            buf.push_str(&format!("{} {}", x, y));
        }
        buf.push(')');
    }
    fn polygon(buf: &mut String, p: &Polygon2) {
        buf.push('(');
        coords(buf, p.closed_ring());
        buf.push(')');
    }
    fn parts<T>(buf: &mut String, xs: &[T], f: fn(&mut String, &T)) {
        buf.push('(');
        for (i, x) in xs.iter().enumerate() {
            if i > 0 {
                buf.push_str(", ");
            }
            f(buf, x);
        }
        buf.push(')');
    }

    let mut buf = String::new();
    match geometry {
        Geometry::Polygon(p) => {
            buf.push_str("POLYGON ");
            polygon(&mut buf, p);
        }
        Geometry::MultiPolygon(x) => {
            buf.push_str("MULTIPOLYGON ");
            parts(&mut buf, x, polygon);
        }
        Geometry::LineString(l) => {
            buf.push_str("LINESTRING ");
            coords(&mut buf, l.iter());
        }
        Geometry::MultiLineString(x) => {
            buf.push_str("MULTILINESTRING ");
            parts(&mut buf, x, |buf: &mut String, l: &Polyline2| {
                coords(buf, l.iter())
            });
        }
    }
    buf
}

enum Raw {
    Polygon(Vec<Vec<Point2>>),
    MultiPolygon(Vec<Vec<Vec<Point2>>>),
    LineString(Vec<Point2>),
    MultiLineString(Vec<Vec<Point2>>),
}

fn de(s: &str) -> std::result::Result<Raw, nom::Err<()>> {
    use nom::{
        branch::alt,
        bytes::complete::tag_no_case,
        character::complete::{char, multispace0},
        combinator::{all_consuming, map},
        multi::separated_list1,
        number::complete::double,
        sequence::{delimited, pair, preceded, terminated},
        IResult, Parser,
    };

    fn ws<'a, G, O>(g: G) -> impl FnMut(&'a str) -> IResult<&'a str, O, ()>
    where
        G: Parser<&'a str, O, ()>,
    {
        preceded(multispace0, g)
    }

    fn list<'a, G, O>(g: G) -> impl FnMut(&'a str) -> IResult<&'a str, Vec<O>, ()>
    where
        G: Parser<&'a str, O, ()>,
    {
        delimited(
            ws(char('(')),
            separated_list1(ws(char(',')), g),
            ws(char(')')),
        )
    }

    fn coord(i: &str) -> IResult<&str, Point2, ()> {
        map(pair(ws(double), ws(double)), |(x, y)| [x, y])(i)
    }
    fn coords(i: &str) -> IResult<&str, Vec<Point2>, ()> {
        list(coord)(i)
    }
    fn rings(i: &str) -> IResult<&str, Vec<Vec<Point2>>, ()> {
        list(coords)(i)
    }
    fn polygons(i: &str) -> IResult<&str, Vec<Vec<Vec<Point2>>>, ()> {
        list(rings)(i)
    }

    let geometry = alt((
        map(
            preceded(ws(tag_no_case("MULTIPOLYGON")), polygons),
            Raw::MultiPolygon,
        ),
        map(
            preceded(ws(tag_no_case("MULTILINESTRING")), rings),
            Raw::MultiLineString,
        ),
        map(preceded(ws(tag_no_case("POLYGON")), rings), Raw::Polygon),
        map(
            preceded(ws(tag_no_case("LINESTRING")), coords),
            Raw::LineString,
        ),
    ));

    let (_, raw) = all_consuming(terminated(geometry, multispace0))(s)?;
    Ok(raw)
}

fn to_polygon(mut rings: Vec<Vec<Point2>>) -> Result<Polygon2> {
    if rings.len() != 1 {
        return Err("only polygons with a single exterior ring are supported".into());
    }
    let mut ring = rings.remove(0);
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    Ok(Polygon2::new(ring)?)
}

/// Read a geometry from WKT.
///
/// Polygons must not have holes; a repeated closing vertex is dropped.
pub fn from_wkt(wkt: &str) -> Result<Geometry> {
    let raw = de(wkt).map_err(|_| "malformed WKT geometry")?;
    let g = match raw {
        Raw::Polygon(rings) => Geometry::Polygon(to_polygon(rings)?),
        Raw::MultiPolygon(x) => Geometry::MultiPolygon(
            x.into_iter()
                .map(to_polygon)
                .collect::<Result<Vec<_>>>()?,
        ),
        Raw::LineString(ps) => Geometry::LineString(Polyline2::new(ps)?),
        Raw::MultiLineString(x) => Geometry::MultiLineString(
            x.into_iter()
                .map(|ps| Polyline2::new(ps).map_err(Into::into))
                .collect::<Result<Vec<_>>>()?,
        ),
    };
    log::trace!("read {:?} with {} parts from WKT", g.kind(), g.part_count());
    Ok(g)
}
