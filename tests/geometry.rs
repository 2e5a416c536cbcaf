mod common;

use common::EPS;
use contract_pdf::layout::LayoutGeometry;
use contract_pdf::{Error, PageGeometry};

#[test]
fn a4_bands_are_derived_from_margins_and_bands() {
    let g = LayoutGeometry::new(&PageGeometry::default()).expect("valid");
    assert!((g.content_start_y - 120.0).abs() < EPS);
    assert!((g.content_end_y - 761.89).abs() < EPS);
    assert!((g.content_width - 515.28).abs() < EPS);
    assert!((g.available_height - 641.89).abs() < EPS);
    assert!((g.content_left() - 40.0).abs() < EPS);
    assert!((g.content_right() - 555.28).abs() < EPS);
    assert!((g.footer_bottom() - 801.89).abs() < EPS);
}

#[test]
fn custom_bands_shift_the_content_band() {
    let page = PageGeometry {
        header_height: 120.0,
        footer_height: 10.0,
        margin_top: 20.0,
        ..PageGeometry::default()
    };
    let g = LayoutGeometry::new(&page).expect("valid");
    assert!((g.content_start_y - 140.0).abs() < EPS);
    assert!((g.content_end_y - (841.89 - 40.0 - 10.0)).abs() < EPS);
    assert!(
        (g.available_height - (g.content_end_y - g.content_start_y)).abs() < EPS
    );
}

#[test]
fn margins_wider_than_the_page_are_rejected() {
    let page = PageGeometry {
        margin_left: 300.0,
        margin_right: 300.0,
        ..PageGeometry::default()
    };
    let err = LayoutGeometry::new(&page).unwrap_err();
    assert!(matches!(err, Error::InvalidGeometry(_)), "{err}");
}

#[test]
fn bands_taller_than_the_page_are_rejected() {
    let page = PageGeometry {
        header_height: 500.0,
        footer_height: 300.0,
        ..PageGeometry::default()
    };
    assert!(matches!(
        LayoutGeometry::new(&page),
        Err(Error::InvalidGeometry(_))
    ));
}

#[test]
fn negative_and_non_finite_values_are_rejected() {
    for page in [
        PageGeometry {
            margin_top: -1.0,
            ..PageGeometry::default()
        },
        PageGeometry {
            page_width: f32::NAN,
            ..PageGeometry::default()
        },
        PageGeometry {
            footer_height: f32::INFINITY,
            ..PageGeometry::default()
        },
    ] {
        let err = LayoutGeometry::new(&page).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry(_)), "{page:?}: {err}");
    }
}

#[test]
fn derive_does_not_validate() {
    let page = PageGeometry {
        margin_left: 400.0,
        margin_right: 400.0,
        ..PageGeometry::default()
    };
    let g = LayoutGeometry::derive(&page);
    assert!(g.content_width < 0.0);
}
