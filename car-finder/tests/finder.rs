use car_finder::{storage::FileStorage, CarFinder, FetchError, StorageError};
use shared::{
    data::{Car, Fuel},
    filters::FilterKey,
};

fn car(id: u64, price: f64) -> Car {
    Car {
        id,
        brand: "Toyota".into(),
        model: format!("Model {id}"),
        price,
        fuel: Fuel::Petrol,
        seats: 5,
        image: format!("https://cdn.example.com/{id}.jpg"),
    }
}

fn ids(cars: &[Car]) -> Vec<u64> {
    cars.iter().map(|car| car.id).collect()
}

#[test]
fn ascending_sort_orders_fetched_cars() {
    let dir = tempfile::tempdir().unwrap();
    let mut finder = CarFinder::new(FileStorage::new(dir.path())).unwrap();

    let request = finder.update_filter(FilterKey::Sort, "asc");
    assert_eq!(request.filters.sort, "asc");
    finder.finish_fetch(request.id, Ok(vec![car(1, 30000.0), car(2, 10000.0)]));

    assert_eq!(ids(finder.page_cars()), vec![2, 1]);
}

#[test]
fn network_failure_on_first_load_leaves_grid_empty() {
    let dir = tempfile::tempdir().unwrap();
    let mut finder = CarFinder::new(FileStorage::new(dir.path())).unwrap();

    let request = finder.begin_fetch();
    finder.finish_fetch(
        request.id,
        Err(FetchError::Transport("connection refused".into())),
    );

    assert!(finder.cars().is_empty());
    assert!(finder.page_cars().is_empty());
    assert_eq!(
        finder.error(),
        Some("Failed to fetch cars: connection refused")
    );
    assert!(!finder.is_loading());
}

#[test]
fn pages_split_fetched_cars_by_ten() {
    let dir = tempfile::tempdir().unwrap();
    let mut finder = CarFinder::new(FileStorage::new(dir.path())).unwrap();

    let request = finder.begin_fetch();
    finder.finish_fetch(request.id, Ok((1..=23).map(|id| car(id, 1.0)).collect()));
    assert_eq!(finder.total_pages(), 3);

    finder.select_page(2);
    assert_eq!(ids(finder.page_cars()), (11..=20).collect::<Vec<_>>());
    finder.select_page(3);
    assert_eq!(ids(finder.page_cars()), vec![21, 22, 23]);
    finder.select_page(4);
    assert!(finder.page_cars().is_empty());

    let request = finder.update_filter(FilterKey::Search, "Model");
    finder.finish_fetch(request.id, Ok((1..=23).map(|id| car(id, 1.0)).collect()));
    assert_eq!(finder.current_page(), 1);
}

#[test]
fn wishlist_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut finder = CarFinder::new(FileStorage::new(dir.path())).unwrap();
    finder.toggle_wishlist(&car(3, 1.0));
    finder.toggle_wishlist(&car(8, 1.0));
    finder.toggle_wishlist(&car(3, 1.0));
    drop(finder);

    let restarted = CarFinder::new(FileStorage::new(dir.path())).unwrap();
    assert!(restarted.is_wishlisted(8));
    assert!(!restarted.is_wishlisted(3));
    assert_eq!(restarted.wishlist().len(), 1);
}

#[test]
fn empty_wishlist_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("wishlist.json"), "").unwrap();

    let mut finder = CarFinder::new(FileStorage::new(dir.path())).unwrap();
    assert!(finder.wishlist().is_empty());

    finder.toggle_wishlist(&car(4, 1.0));
    let restarted = CarFinder::new(FileStorage::new(dir.path())).unwrap();
    assert!(restarted.is_wishlisted(4));
}

#[test]
fn malformed_wishlist_fails_start_up() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("wishlist.json"), "[{\"id\":").unwrap();

    let result = CarFinder::new(FileStorage::new(dir.path()));

    assert!(matches!(result, Err(StorageError::Malformed { .. })));
}
