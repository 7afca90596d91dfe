use {
    crate::{
        config::{DF, customers_path, orders_path},
        domain::{CustomerCharacteristics, OrderRecord},
    },
    anyhow::{Context, Result},
    serde::de::DeserializeOwned,
    std::{
        collections::HashMap,
        fmt,
        fs,
        hash::{DefaultHasher, Hash, Hasher},
        io::Read,
        path::{Path, PathBuf},
    },
};

/// Content hash of the input files. Changes whenever either CSV changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DataVersion(pub u64);

impl DataVersion {
    pub fn of(orders_csv: &[u8], customers_csv: &[u8]) -> Self {
        let mut hasher = DefaultHasher::new();
        orders_csv.hash(&mut hasher);
        customers_csv.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// Hash the files on disk without parsing them.
    pub fn of_dir(data_dir: &Path) -> Result<Self> {
        let orders = read_file(&orders_path(data_dir))?;
        let customers = read_file(&customers_path(data_dir))?;
        Ok(Self::of(&orders, &customers))
    }
}

impl fmt::Display for DataVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Both input tables plus the version they were read at.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub orders: Vec<OrderRecord>,
    pub customers: Vec<CustomerCharacteristics>,
    pub version: DataVersion,
    pub source_dir: Option<PathBuf>,
    by_id: HashMap<String, usize>,
}

impl Dataset {
    pub fn new(
        orders: Vec<OrderRecord>,
        customers: Vec<CustomerCharacteristics>,
        version: DataVersion,
    ) -> Self {
        let by_id = customers
            .iter()
            .enumerate()
            .map(|(i, c)| (c.customer_id.clone(), i))
            .collect();
        Self {
            orders,
            customers,
            version,
            source_dir: None,
            by_id,
        }
    }

    /// Parse both CSV files from memory. The version is the hash of the raw bytes.
    pub fn from_csv_bytes(orders_csv: &[u8], customers_csv: &[u8]) -> Result<Self> {
        let orders = read_rows::<OrderRecord, _>(orders_csv, "orders")?;
        let customers = read_rows::<CustomerCharacteristics, _>(customers_csv, "customers")?;
        Ok(Self::new(
            orders,
            customers,
            DataVersion::of(orders_csv, customers_csv),
        ))
    }

    pub fn customer(&self, customer_id: &str) -> Option<&CustomerCharacteristics> {
        self.by_id.get(customer_id).map(|&i| &self.customers[i])
    }

    pub fn orders_of<'a>(&'a self, customer_id: &'a str) -> impl Iterator<Item = &'a OrderRecord> + 'a {
        self.orders
            .iter()
            .filter(move |o| o.customer_id == customer_id)
    }
}

/// Load `df_order.csv` and `customers_characteristics.csv` from `data_dir`.
pub fn load_dataset(data_dir: &Path) -> Result<Dataset> {
    let orders_file = orders_path(data_dir);
    let customers_file = customers_path(data_dir);

    let orders_csv = read_file(&orders_file)?;
    let customers_csv = read_file(&customers_file)?;

    let mut dataset = crate::trace_time!("Load CSV", 200_000, {
        Dataset::from_csv_bytes(&orders_csv, &customers_csv)
    })
    .with_context(|| format!("Failed to parse data in {}", data_dir.display()))?;
    dataset.source_dir = Some(data_dir.to_path_buf());

    if DF.log_data_load {
        log::info!(
            "Loaded {} orders and {} customers from {} (version {})",
            dataset.orders.len(),
            dataset.customers.len(),
            data_dir.display(),
            dataset.version
        );
    }
    Ok(dataset)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn read_rows<T, R>(reader: R, table: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize()
        .enumerate()
        .map(|(i, row)| {
            // +2: 1-based, plus the header line
            row.with_context(|| format!("{} table: bad row at line {}", table, i + 2))
        })
        .collect()
}
