// Map-shaped JSON read as a list of pairs so arrival order survives decoding.
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use std::marker::PhantomData;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderedPairs<V>(pub Vec<(String, V)>);

impl<V> OrderedPairs<V> {
    pub fn into_inner(self) -> Vec<(String, V)> {
        self.0
    }
}

impl<'de, V> Deserialize<'de> for OrderedPairs<V>
where
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PairsVisitor<V>(PhantomData<V>);

        impl<'de, V> Visitor<'de> for PairsVisitor<V>
        where
            V: Deserialize<'de>,
        {
            type Value = OrderedPairs<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, V>()? {
                    pairs.push((key, value));
                }
                Ok(OrderedPairs(pairs))
            }
        }

        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}
